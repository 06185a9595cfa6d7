//! AI service adapters.
//!
//! Implementations of the SentimentAnalyzer port.
//!
//! ## Available Adapters
//!
//! - `HttpSentimentAnalyzer` - Calls the AI service's analyze-sentiment endpoint
//! - `MockSentimentAnalyzer` - Configurable mock for testing

mod http_sentiment_analyzer;
mod mock_sentiment_analyzer;

pub use http_sentiment_analyzer::{HttpSentimentAnalyzer, HttpSentimentConfig};
pub use mock_sentiment_analyzer::{MockError, MockReply, MockSentimentAnalyzer};
