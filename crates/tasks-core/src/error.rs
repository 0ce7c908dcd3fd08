use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Rejected client input. The message is returned to the caller as-is.
    #[error("{0}")]
    Validation(String),

    /// Failure reported by the storage layer, message passed through verbatim.
    #[error("{0}")]
    Storage(String),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
