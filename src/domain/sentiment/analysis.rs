//! The analysis document written to `submissions.analysis`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};

use super::alert::{flag_reason, AlertLevel};
use super::result::SentimentAnalysisResult;

/// Normalized result plus its alert flags, stored under `analysis.sentiment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSentiment {
    #[serde(flatten)]
    pub result: SentimentAnalysisResult,
    pub flagged: bool,
    pub flag_reason: Option<String>,
    pub alert_level: Option<AlertLevel>,
}

impl StoredSentiment {
    pub fn from_result(result: SentimentAnalysisResult) -> Self {
        let alert_level = AlertLevel::from_score(result.aggregate.score);
        let flag_reason = alert_level.map(|_| flag_reason(Some(&result)));

        Self {
            flagged: alert_level.is_some(),
            flag_reason,
            alert_level,
            result,
        }
    }
}

/// Sentiment analysis entry for one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionAnalysis {
    /// Provider that produced the result (`openai`, `anthropic`, ...).
    pub provider: String,
    #[serde(with = "rfc3339_millis")]
    pub timestamp: Timestamp,
    pub sentiment: StoredSentiment,
}

impl SubmissionAnalysis {
    pub fn new(provider: impl Into<String>, result: SentimentAnalysisResult) -> Self {
        Self {
            provider: provider.into(),
            timestamp: Timestamp::now(),
            sentiment: StoredSentiment::from_result(result),
        }
    }

    pub fn is_flagged(&self) -> bool {
        self.sentiment.flagged
    }

    /// JSON object merged into the submission's `analysis` column.
    pub fn to_json(&self) -> Result<Value, DomainError> {
        serde_json::to_value(self).map_err(|e| {
            DomainError::new(
                ErrorCode::SerializationFailed,
                format!("Failed to serialize sentiment analysis: {}", e),
            )
        })
    }
}

mod rfc3339_millis {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::domain::foundation::Timestamp;

    pub fn serialize<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        Timestamp::deserialize(deserializer)
    }
}
