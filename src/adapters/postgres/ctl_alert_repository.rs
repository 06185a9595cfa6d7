//! PostgreSQL implementation of CtlAlertRepository.
//!
//! Uses `ON CONFLICT DO NOTHING` so re-running a backfill never creates a
//! second alert for the same submission.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::DomainError;
use crate::domain::sentiment::CtlAlert;
use crate::ports::CtlAlertRepository;

/// PostgreSQL implementation of CtlAlertRepository.
#[derive(Clone)]
pub struct PostgresCtlAlertRepository {
    pool: PgPool,
}

impl PostgresCtlAlertRepository {
    /// Creates a new PostgresCtlAlertRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CtlAlertRepository for PostgresCtlAlertRepository {
    async fn insert_if_absent(&self, alert: &CtlAlert) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO ctl_alerts (
                tenant_id, form_id, submission_id, alert_level,
                score_value, score_type, sentiment
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(alert.tenant_id.as_uuid())
        .bind(alert.form_id.as_uuid())
        .bind(alert.submission_id.as_uuid())
        .bind(alert.alert_level.as_str())
        .bind(alert.score_value)
        .bind(&alert.score_type)
        .bind(alert.sentiment.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert CTL alert", e))?;

        Ok(result.rows_affected() > 0)
    }
}
