pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use config::Settings;
pub use error::ApiError;
pub use routes::create_router;
pub use state::ApiState;
