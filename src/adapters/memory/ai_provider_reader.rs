//! Fixed AiProviderReader for tests and local runs.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::ports::{ActiveAiProvider, AiProviderReader};

/// Returns the provider it was built with, or none.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAiProviderReader {
    active: Option<ActiveAiProvider>,
}

impl InMemoryAiProviderReader {
    pub fn new(active: Option<ActiveAiProvider>) -> Self {
        Self { active }
    }

    pub fn with_provider(provider: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::new(Some(ActiveAiProvider::new(provider, api_key)))
    }
}

#[async_trait]
impl AiProviderReader for InMemoryAiProviderReader {
    async fn find_active(&self) -> Result<Option<ActiveAiProvider>, DomainError> {
        Ok(self.active.clone())
    }
}
