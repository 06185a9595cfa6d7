//! Lookup of the platform's active AI provider.

use async_trait::async_trait;
use secrecy::Secret;

use crate::domain::foundation::DomainError;

/// The AI provider record currently switched on for the platform.
#[derive(Debug, Clone)]
pub struct ActiveAiProvider {
    /// Provider name, e.g. `openai` or `anthropic`.
    pub provider: String,
    pub api_key: Secret<String>,
}

impl ActiveAiProvider {
    pub fn new(provider: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            api_key: Secret::new(api_key.into()),
        }
    }
}

/// Read access to AI provider configuration rows.
#[async_trait]
pub trait AiProviderReader: Send + Sync {
    /// Returns the single active provider, if one is configured.
    async fn find_active(&self) -> Result<Option<ActiveAiProvider>, DomainError>;
}
