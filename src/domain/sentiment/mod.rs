//! Sentiment module - pure pipeline from raw answers to alert decisions.
//!
//! # Flow
//!
//! ```text
//! answers -> extract_text_fields -> build_sentiment_prompt (redact_pii)
//!         -> [provider] -> parse_sentiment_response -> AlertLevel / CtlAlert
//! ```
//!
//! Nothing here performs I/O or holds shared state; every function can be
//! called concurrently from request handlers and the backfill job alike.

mod alert;
mod analysis;
mod answer;
mod extractor;
mod normalize;
mod parser;
mod prompt;
mod redaction;
mod result;
mod submission;

pub use alert::{
    ctl_alert_level, flag_reason, should_trigger_alert, AlertLevel, CtlAlert,
    FALLBACK_FLAG_REASON, SENTIMENT_SCORE_TYPE,
};
pub use analysis::{StoredSentiment, SubmissionAnalysis};
pub use answer::AnswerValue;
pub use extractor::{
    extract_text_fields, find_question_title, humanize_field_name, ExtractedTextField,
    MIN_TEXT_LENGTH,
};
pub use normalize::{
    clamp_confidence, clamp_confidence_value, clamp_score, clamp_score_value,
    DEFAULT_CONFIDENCE,
};
pub use parser::{normalize_sentiment_value, parse_sentiment_response};
pub use prompt::build_sentiment_prompt;
pub use redaction::{redact_pii, EMAIL_PLACEHOLDER, PHONE_PLACEHOLDER};
pub use result::{
    Emotion, FieldSentiment, SentimentAggregate, SentimentAnalysisResult, UnknownEmotion,
};
pub use submission::Submission;
