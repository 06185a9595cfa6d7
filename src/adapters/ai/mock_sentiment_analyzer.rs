//! Mock Sentiment Analyzer for testing.
//!
//! Provides a configurable mock implementation of the SentimentAnalyzer port,
//! allowing tests to run without an AI service.
//!
//! # Features
//!
//! - Pre-configured replies, consumed in order
//! - Error injection for failure accounting
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let analyzer = MockSentimentAnalyzer::new()
//!     .with_reply(json!(r#"{"aggregate":{"score":-0.8,"emotion":"angry"}}"#))
//!     .with_error(MockError::Unavailable { message: "down".into() });
//!
//! let first = analyzer.analyze(&request).await?;
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{AIError, SentimentAnalyzer, SentimentRequest};

/// Mock sentiment analyzer for testing.
#[derive(Debug, Clone, Default)]
pub struct MockSentimentAnalyzer {
    /// Pre-configured replies (consumed in order).
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<SentimentRequest>>>,
}

/// A configured mock reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this `sentiment` member.
    Sentiment(Value),
    /// Return an error.
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u64 },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Timeout { timeout_secs } => AIError::Timeout { timeout_secs },
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockSentimentAnalyzer {
    /// Creates a new mock analyzer with an empty reply queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a successful reply to the queue.
    pub fn with_reply(self, sentiment: Value) -> Self {
        lock(&self.replies).push_back(MockReply::Sentiment(sentiment));
        self
    }

    /// Adds an error reply to the queue.
    pub fn with_error(self, error: MockError) -> Self {
        lock(&self.replies).push_back(MockReply::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this analyzer.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<SentimentRequest> {
        lock(&self.calls).clone()
    }

    /// Next queued reply; a missing `sentiment` member once exhausted.
    fn next_reply(&self) -> MockReply {
        lock(&self.replies)
            .pop_front()
            .unwrap_or(MockReply::Sentiment(Value::Null))
    }
}

#[async_trait]
impl SentimentAnalyzer for MockSentimentAnalyzer {
    async fn analyze(&self, request: &SentimentRequest) -> Result<Value, AIError> {
        lock(&self.calls).push(request.clone());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_reply() {
            MockReply::Sentiment(value) => Ok(value),
            MockReply::Error(err) => Err(err.into()),
        }
    }
}
