pub mod config;
pub mod models;
pub mod repository;
pub mod error;

// Re-exports
pub use config::DatabaseConfig;
pub use models::TaskRecord;
pub use repository::Database;
pub use error::{Error, Result};
