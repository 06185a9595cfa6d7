//! AI service configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MAX_TIMEOUT_SECS: u64 = 600;

/// AI service configuration
///
/// Provider credentials come from the active `ai_providers` row; only the
/// service location, the model and the request timeout live here.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Base URL of the AI service (`POST {service_url}/analyze-sentiment`)
    #[serde(default)]
    pub service_url: String,

    /// Model name forwarded as `aiConfig.model`
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.service_url.is_empty() {
            return Err(ValidationError::MissingRequired("AI__SERVICE_URL"));
        }
        if !self.service_url.starts_with("http://") && !self.service_url.starts_with("https://") {
            return Err(ValidationError::InvalidServiceUrl);
        }
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AI__MODEL"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            service_url: String::new(),
            model: default_model(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_timeout() -> u64 {
    60
}
