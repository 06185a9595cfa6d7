//! In-memory implementation of SubmissionRepository.
//!
//! Mirrors the PostgreSQL adapter's selection and merge rules:
//! a row is unanalyzed while its `analysis` document lacks a `sentiment`
//! key, pages are newest-first, and saving merges into existing keys.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, SubmissionId};
use crate::domain::sentiment::{Submission, SubmissionAnalysis};
use crate::ports::SubmissionRepository;

#[derive(Debug, Clone)]
struct StoredSubmission {
    submission: Submission,
    analysis: Option<Value>,
}

impl StoredSubmission {
    fn is_unanalyzed(&self) -> bool {
        self.analysis
            .as_ref()
            .and_then(|a| a.get("sentiment"))
            .is_none()
    }
}

/// In-memory submission store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySubmissionRepository {
    /// Oldest first; pages are served from the back.
    rows: Arc<RwLock<Vec<StoredSubmission>>>,
    fail_saves: Arc<AtomicBool>,
}

impl InMemorySubmissionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a submission as the newest row.
    pub async fn insert(&self, submission: Submission) {
        self.insert_with_analysis(submission, None).await;
    }

    /// Adds a submission with a pre-existing `analysis` document.
    pub async fn insert_with_analysis(&self, submission: Submission, analysis: Option<Value>) {
        self.rows.write().await.push(StoredSubmission {
            submission,
            analysis,
        });
    }

    /// Makes every subsequent `save_analysis` fail with a database error.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Returns the stored `analysis` document of a submission.
    pub async fn analysis_of(&self, id: &SubmissionId) -> Option<Value> {
        self.rows
            .read()
            .await
            .iter()
            .find(|row| &row.submission.id == id)
            .and_then(|row| row.analysis.clone())
    }

    /// Number of stored submissions.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn count_unanalyzed(&self) -> Result<u64, DomainError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().filter(|row| row.is_unanalyzed()).count() as u64)
    }

    async fn find_unanalyzed(
        &self,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<Submission>, DomainError> {
        let rows = self.rows.read().await;
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);

        Ok(rows
            .iter()
            .rev()
            .filter(|row| row.is_unanalyzed())
            .skip(offset)
            .take(limit as usize)
            .map(|row| row.submission.clone())
            .collect())
    }

    async fn save_analysis(
        &self,
        id: &SubmissionId,
        analysis: &SubmissionAnalysis,
    ) -> Result<(), DomainError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(DomainError::database(
                "Failed to save submission analysis",
                "connection reset",
            ));
        }

        let document = analysis.to_json()?;
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|row| &row.submission.id == id)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::SubmissionNotFound,
                    format!("Submission not found: {}", id),
                )
            })?;

        row.analysis = Some(merge(row.analysis.take(), document));
        Ok(())
    }
}

/// Top-level key merge, new keys win.
fn merge(existing: Option<Value>, update: Value) -> Value {
    let mut merged = match existing {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };
    if let Value::Object(update) = update {
        merged.extend(update);
    }
    Value::Object(merged)
}
