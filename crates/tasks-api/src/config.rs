use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use tasks_db::{config::DEFAULT_DATABASE_URL, DatabaseConfig};

pub const DEFAULT_PORT: u16 = 8001;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Service settings. Defaults can be overridden with `TASKS__<SECTION>__<KEY>`
/// environment variables, e.g. `TASKS__SERVER__PORT=9000`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env(Environment::default())
    }

    pub fn from_env(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("database.url", DEFAULT_DATABASE_URL)?
            .set_default("database.max_connections", 5)?
            .add_source(
                env.prefix("TASKS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
