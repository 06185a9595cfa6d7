//! In-memory implementation of CtlAlertRepository.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::domain::sentiment::CtlAlert;
use crate::ports::CtlAlertRepository;

/// In-memory alert table, unique on `(submission_id, score_type)`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCtlAlertRepository {
    alerts: Arc<RwLock<Vec<CtlAlert>>>,
}

impl InMemoryCtlAlertRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored alerts in insertion order.
    pub async fn alerts(&self) -> Vec<CtlAlert> {
        self.alerts.read().await.clone()
    }
}

#[async_trait]
impl CtlAlertRepository for InMemoryCtlAlertRepository {
    async fn insert_if_absent(&self, alert: &CtlAlert) -> Result<bool, DomainError> {
        let mut alerts = self.alerts.write().await;
        let exists = alerts.iter().any(|a| {
            a.submission_id == alert.submission_id && a.score_type == alert.score_type
        });
        if exists {
            return Ok(false);
        }
        alerts.push(alert.clone());
        Ok(true)
    }
}
