//! Close-the-loop alert persistence.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::sentiment::CtlAlert;

/// Repository port for CTL alerts.
#[async_trait]
pub trait CtlAlertRepository: Send + Sync {
    /// Inserts the alert unless one already exists for the same submission
    /// and alert; duplicates are ignored.
    ///
    /// Returns `true` when a row was inserted.
    async fn insert_if_absent(&self, alert: &CtlAlert) -> Result<bool, DomainError>;
}
