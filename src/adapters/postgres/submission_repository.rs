//! PostgreSQL implementation of SubmissionRepository.
//!
//! Reads pending submissions with their form definitions and merges the
//! analysis document into `submissions.analysis`.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, FormId, SubmissionId, TenantId};
use crate::domain::sentiment::{Submission, SubmissionAnalysis};
use crate::ports::SubmissionRepository;

/// PostgreSQL implementation of SubmissionRepository.
#[derive(Clone)]
pub struct PostgresSubmissionRepository {
    pool: PgPool,
}

impl PostgresSubmissionRepository {
    /// Creates a new PostgresSubmissionRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionRepository for PostgresSubmissionRepository {
    async fn count_unanalyzed(&self) -> Result<u64, DomainError> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM submissions
            WHERE analysis IS NULL OR analysis->'sentiment' IS NULL
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to count unanalyzed submissions", e))?;

        Ok(result.0.max(0) as u64)
    }

    async fn find_unanalyzed(
        &self,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<Submission>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT s.id, s.tenant_id, s.form_id, s.data, f.definition
            FROM submissions s
            LEFT JOIN forms f ON f.id = s.form_id
            WHERE s.analysis IS NULL OR s.analysis->'sentiment' IS NULL
            ORDER BY s.created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(limit))
        .bind(i64::try_from(offset).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch unanalyzed submissions", e))?;

        rows.into_iter().map(row_to_submission).collect()
    }

    async fn save_analysis(
        &self,
        id: &SubmissionId,
        analysis: &SubmissionAnalysis,
    ) -> Result<(), DomainError> {
        let document = analysis.to_json()?;

        let result = sqlx::query(
            r#"
            UPDATE submissions
            SET analysis = COALESCE(analysis, '{}'::jsonb) || $2
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(document)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to save submission analysis", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SubmissionNotFound,
                format!("Submission not found: {}", id),
            )
            .with_detail("submission_id", id.to_string()));
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_submission(row: PgRow) -> Result<Submission, DomainError> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| DomainError::database("Failed to read submission id", e))?;
    let tenant_id: Uuid = row
        .try_get("tenant_id")
        .map_err(|e| DomainError::database("Failed to read tenant_id", e))?;
    let form_id: Uuid = row
        .try_get("form_id")
        .map_err(|e| DomainError::database("Failed to read form_id", e))?;
    let data: Option<serde_json::Value> = row
        .try_get("data")
        .map_err(|e| DomainError::database("Failed to read submission data", e))?;
    let definition: Option<serde_json::Value> = row
        .try_get("definition")
        .map_err(|e| DomainError::database("Failed to read form definition", e))?;

    Ok(Submission {
        id: SubmissionId::from_uuid(id),
        tenant_id: TenantId::from_uuid(tenant_id),
        form_id: FormId::from_uuid(form_id),
        data: data.unwrap_or(serde_json::Value::Null),
        form_definition: definition,
    })
}
