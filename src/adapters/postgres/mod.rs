//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresSubmissionRepository` - Unanalyzed submission paging and analysis writes
//! - `PostgresCtlAlertRepository` - Conflict-safe CTL alert inserts
//! - `PostgresAiProviderReader` - Active AI provider lookup

mod ai_provider_reader;
mod ctl_alert_repository;
mod submission_repository;

pub use ai_provider_reader::PostgresAiProviderReader;
pub use ctl_alert_repository::PostgresCtlAlertRepository;
pub use submission_repository::PostgresSubmissionRepository;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::domain::foundation::DomainError;

/// Opens a connection pool sized by the database configuration.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    info!(
        database = %config.redacted_url(),
        max_connections = config.max_connections,
        "Connecting to PostgreSQL"
    );
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::database("Failed to connect to PostgreSQL", e))
}
