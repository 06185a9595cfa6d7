//! Submission persistence for sentiment analysis.
//!
//! "Unanalyzed" means the submission has no `analysis` document or the
//! document has no `sentiment` entry.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SubmissionId};
use crate::domain::sentiment::{Submission, SubmissionAnalysis};

/// Repository port for reading unanalyzed submissions and storing results.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Counts submissions still lacking a sentiment analysis.
    async fn count_unanalyzed(&self) -> Result<u64, DomainError>;

    /// Returns a page of unanalyzed submissions, newest first.
    async fn find_unanalyzed(
        &self,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<Submission>, DomainError>;

    /// Stores the analysis under the submission's `analysis` document.
    ///
    /// # Errors
    ///
    /// `SubmissionNotFound` if the submission does not exist.
    async fn save_analysis(
        &self,
        id: &SubmissionId,
        analysis: &SubmissionAnalysis,
    ) -> Result<(), DomainError>;
}
