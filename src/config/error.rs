//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("AI service URL must use http or https")]
    InvalidServiceUrl,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Batch size must be between 1 and 1000")]
    InvalidBatchSize,

    #[error("Per-item delay below 200ms exceeds the provider rate limit")]
    DelayBelowRateLimit,

    #[error("Invalid log filter: {0}")]
    InvalidLogLevel(String),
}
