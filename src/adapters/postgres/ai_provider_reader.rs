//! PostgreSQL implementation of AiProviderReader.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::DomainError;
use crate::ports::{ActiveAiProvider, AiProviderReader};

/// Reads the active provider from `ai_providers`.
#[derive(Clone)]
pub struct PostgresAiProviderReader {
    pool: PgPool,
}

impl PostgresAiProviderReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AiProviderReader for PostgresAiProviderReader {
    async fn find_active(&self) -> Result<Option<ActiveAiProvider>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT provider, api_key FROM ai_providers
            WHERE is_active = true
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch active AI provider", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let provider: String = row
            .try_get("provider")
            .map_err(|e| DomainError::database("Failed to read provider", e))?;
        let api_key: String = row
            .try_get("api_key")
            .map_err(|e| DomainError::database("Failed to read api_key", e))?;

        Ok(Some(ActiveAiProvider::new(provider, api_key)))
    }
}
