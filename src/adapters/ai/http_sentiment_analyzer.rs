//! HTTP Sentiment Analyzer - Implementation of SentimentAnalyzer over the AI service.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpSentimentConfig::new("http://ai-service:8000")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let analyzer = HttpSentimentAnalyzer::new(config)?;
//! ```
//!
//! Every call carries an explicit timeout so a stalled provider surfaces as
//! [`AIError::Timeout`] instead of hanging the caller.

use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::ports::{AIError, SentimentAnalyzer, SentimentRequest};

const ANALYZE_PATH: &str = "/analyze-sentiment";
const DEFAULT_RETRY_AFTER_SECS: u32 = 30;

/// Configuration for the HTTP sentiment analyzer.
#[derive(Debug, Clone)]
pub struct HttpSentimentConfig {
    /// Base URL of the AI service, without the endpoint path.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl HttpSentimentConfig {
    /// Creates a new configuration for the given service URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Reply body of the analyze-sentiment endpoint.
#[derive(Debug, Deserialize)]
struct AnalyzeSentimentResponse {
    #[serde(default)]
    sentiment: Value,
}

/// AI service client implementation.
pub struct HttpSentimentAnalyzer {
    config: HttpSentimentConfig,
    client: Client,
}

impl HttpSentimentAnalyzer {
    /// Creates a new analyzer with the given configuration.
    pub fn new(config: HttpSentimentConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the analyze-sentiment endpoint URL.
    fn endpoint_url(&self) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), ANALYZE_PATH)
    }

    fn map_transport_error(&self, e: reqwest::Error) -> AIError {
        if e.is_timeout() {
            AIError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if e.is_connect() {
            AIError::network(format!("Connection failed: {}", e))
        } else {
            AIError::network(e.to_string())
        }
    }

    /// Maps non-success statuses onto the error taxonomy.
    async fn handle_response_status(&self, response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let retry_after = Self::parse_retry_after(&response);
        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(AIError::AuthenticationFailed),
            429 => Err(AIError::rate_limited(retry_after)),
            500..=599 => Err(AIError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            other => Err(AIError::UnexpectedStatus {
                status: other,
                body: error_body,
            }),
        }
    }

    /// Reads `Retry-After` (seconds); defaults to 30.
    fn parse_retry_after(response: &Response) -> u32 {
        response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
    }
}

#[async_trait]
impl SentimentAnalyzer for HttpSentimentAnalyzer {
    async fn analyze(&self, request: &SentimentRequest) -> Result<Value, AIError> {
        let response = self
            .client
            .post(self.endpoint_url())
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let response = self.handle_response_status(response).await?;

        let body: AnalyzeSentimentResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.map_transport_error(e)
            } else {
                AIError::parse(format!("Failed to parse response: {}", e))
            }
        })?;

        Ok(body.sentiment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::AiCredentials;
    use secrecy::Secret;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> SentimentRequest {
        SentimentRequest::new(
            "Analyze this",
            AiCredentials::new("openai", Secret::new("sk-test".to_string()), "gpt-4o-mini"),
        )
    }

    fn analyzer(server: &MockServer) -> HttpSentimentAnalyzer {
        HttpSentimentAnalyzer::new(
            HttpSentimentConfig::new(server.uri()).with_timeout(Duration::from_millis(500)),
        )
        .unwrap()
    }

    #[test]
    fn endpoint_url_tolerates_trailing_slash() {
        let analyzer =
            HttpSentimentAnalyzer::new(HttpSentimentConfig::new("http://ai:8000/")).unwrap();
        assert_eq!(analyzer.endpoint_url(), "http://ai:8000/analyze-sentiment");
    }

    #[tokio::test]
    async fn posts_prompt_and_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/analyze-sentiment"))
            .and(body_json(json!({
                "prompt": "Analyze this",
                "aiConfig": {"provider": "openai", "apiKey": "sk-test", "model": "gpt-4o-mini"}
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"sentiment": "{\"aggregate\":{\"score\":0.4}}"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let sentiment = analyzer(&server).analyze(&request()).await.unwrap();

        assert_eq!(sentiment, json!("{\"aggregate\":{\"score\":0.4}}"));
    }

    #[tokio::test]
    async fn missing_sentiment_member_is_null() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"other": 1})))
            .mount(&server)
            .await;

        let sentiment = analyzer(&server).analyze(&request()).await.unwrap();

        assert!(sentiment.is_null());
    }

    #[tokio::test]
    async fn maps_error_statuses() {
        let cases = [
            (401, "auth"),
            (429, "rate"),
            (503, "unavailable"),
            (404, "unexpected"),
        ];

        for (status, kind) in cases {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
                .mount(&server)
                .await;

            let err = analyzer(&server).analyze(&request()).await.unwrap_err();

            match (kind, err) {
                ("auth", AIError::AuthenticationFailed) => {}
                ("rate", AIError::RateLimited { retry_after_secs }) => {
                    assert_eq!(retry_after_secs, 30)
                }
                ("unavailable", AIError::Unavailable { message }) => {
                    assert!(message.contains("nope"))
                }
                ("unexpected", AIError::UnexpectedStatus { status, body }) => {
                    assert_eq!(status, 404);
                    assert_eq!(body, "nope");
                }
                (kind, err) => panic!("{} mapped to {:?}", kind, err),
            }
        }
    }

    #[tokio::test]
    async fn reads_retry_after_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
            .mount(&server)
            .await;

        let err = analyzer(&server).analyze(&request()).await.unwrap_err();

        assert!(matches!(err, AIError::RateLimited { retry_after_secs: 7 }));
    }

    #[tokio::test]
    async fn non_json_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = analyzer(&server).analyze(&request()).await.unwrap_err();

        assert!(matches!(err, AIError::Parse(_)));
    }

    #[tokio::test]
    async fn slow_service_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"sentiment": null}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let err = analyzer(&server).analyze(&request()).await.unwrap_err();

        assert!(matches!(err, AIError::Timeout { .. }));
    }
}
