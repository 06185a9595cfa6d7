//! Sentiment Analyzer Port - Interface to the AI service.
//!
//! The AI service owns provider SDKs and model selection. The platform only
//! sends it a rendered prompt together with the tenant-independent provider
//! credentials and receives the provider's raw sentiment reply back.
//!
//! # Wire contract
//!
//! ```text
//! POST {service_url}/analyze-sentiment
//! { "prompt": "...", "aiConfig": { "provider": "...", "apiKey": "...", "model": "..." } }
//!
//! 200 { "sentiment": "<raw text>" | { ...already decoded... } }
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Port for sentiment analysis calls.
#[async_trait]
pub trait SentimentAnalyzer: Send + Sync {
    /// Sends a prompt and returns the `sentiment` member of the reply.
    ///
    /// A reply without a `sentiment` member yields `Value::Null`.
    async fn analyze(&self, request: &SentimentRequest) -> Result<Value, AIError>;
}

/// Body of an analyze-sentiment call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentRequest {
    pub prompt: String,
    pub ai_config: AiCredentials,
}

impl SentimentRequest {
    pub fn new(prompt: impl Into<String>, ai_config: AiCredentials) -> Self {
        Self {
            prompt: prompt.into(),
            ai_config,
        }
    }
}

/// Provider credentials forwarded to the AI service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiCredentials {
    pub provider: String,
    #[serde(serialize_with = "expose_api_key")]
    pub api_key: Secret<String>,
    pub model: String,
}

impl AiCredentials {
    pub fn new(
        provider: impl Into<String>,
        api_key: Secret<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            api_key,
            model: model.into(),
        }
    }
}

fn expose_api_key<S: Serializer>(key: &Secret<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(key.expose_secret())
}

/// AI service errors.
#[derive(Debug, thiserror::Error)]
pub enum AIError {
    /// Rate limited by the service or provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Service is unavailable (5xx).
    #[error("service unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Any other non-success status.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to decode the service response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },
}

impl AIError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
