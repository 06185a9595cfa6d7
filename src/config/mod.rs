//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CX_SENTIMENT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use cx_sentiment::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("AI service at {}", config.ai.service_url);
//! ```

mod ai;
mod backfill;
mod database;
mod error;
mod logging;

pub use ai::AiConfig;
pub use backfill::{BackfillConfig, MIN_DELAY_MS};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// AI service configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// Backfill pacing
    #[serde(default)]
    pub backfill: BackfillConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CX_SENTIMENT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CX_SENTIMENT__DATABASE__URL=...` -> `database.url = ...`
    /// - `CX_SENTIMENT__AI__SERVICE_URL=...` -> `ai.service_url = ...`
    /// - `CX_SENTIMENT__BACKFILL__DELAY_MS=250` -> `backfill.delay_ms = 250`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CX_SENTIMENT")
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
        self.database.validate()?;
        self.ai.validate()?;
        self.backfill.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
