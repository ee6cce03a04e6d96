//! Application configuration module
//!
//! Configuration is loaded from environment variables using the `config` and
//! `dotenvy` crates. Variables carry the `MARKETPLACE_INTEGRATION` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use marketplace_integration::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Default marketplace: {}", config.marketplace.base_url);
//! ```

mod database;
mod error;
mod marketplace;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use marketplace::MarketplaceConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP listener (host, port, environment, log filter)
    #[serde(default)]
    pub server: ServerConfig,

    /// Subscriber database; in-memory storage is used when absent
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Marketplace endpoint and OAuth credentials
    pub marketplace: MarketplaceConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `MARKETPLACE_INTEGRATION` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `MARKETPLACE_INTEGRATION__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `MARKETPLACE_INTEGRATION__MARKETPLACE__BASE_URL=...` -> `marketplace.base_url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MARKETPLACE_INTEGRATION")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.marketplace.validate(&self.server.environment)?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
