use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for tasks_core::Error {
    fn from(err: Error) -> Self {
        tasks_core::Error::Storage(err.to_string())
    }
}
