//! Close-the-loop alert classification.
//!
//! A submission whose aggregate score is negative enough opens a CTL alert
//! so a support agent follows up with the respondent. Mildly negative,
//! neutral and positive submissions never alert.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{FormId, SubmissionId, TenantId};

use super::result::{Emotion, SentimentAnalysisResult};

/// `score_type` recorded on alerts raised by this pipeline.
pub const SENTIMENT_SCORE_TYPE: &str = "sentiment_ai";

/// Reason used when there is no result to describe.
pub const FALLBACK_FLAG_REASON: &str = "Negative sentiment detected";

const CRITICAL_THRESHOLD: f64 = -0.7;
const HIGH_THRESHOLD: f64 = -0.5;
const MEDIUM_THRESHOLD: f64 = -0.3;

/// Severity of a CTL alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Critical,
    High,
    Medium,
}

impl AlertLevel {
    /// Classifies an aggregate score. Thresholds are inclusive and checked
    /// from most to least severe; NaN never alerts.
    pub fn from_score(score: f64) -> Option<Self> {
        if score.is_nan() {
            None
        } else if score <= CRITICAL_THRESHOLD {
            Some(AlertLevel::Critical)
        } else if score <= HIGH_THRESHOLD {
            Some(AlertLevel::High)
        } else if score <= MEDIUM_THRESHOLD {
            Some(AlertLevel::Medium)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Critical => "critical",
            AlertLevel::High => "high",
            AlertLevel::Medium => "medium",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alert level for an optional score; a missing score never alerts.
pub fn ctl_alert_level(score: Option<f64>) -> Option<AlertLevel> {
    score.and_then(AlertLevel::from_score)
}

/// Whether a result warrants a CTL alert.
pub fn should_trigger_alert(result: Option<&SentimentAnalysisResult>) -> bool {
    result
        .and_then(|r| AlertLevel::from_score(r.aggregate.score))
        .is_some()
}

/// Human-readable reason shown on flagged submissions, e.g.
/// `Angry sentiment detected (score: -0.85, High confidence)`.
pub fn flag_reason(result: Option<&SentimentAnalysisResult>) -> String {
    let Some(result) = result else {
        return FALLBACK_FLAG_REASON.to_string();
    };

    let aggregate = &result.aggregate;
    format!(
        "{} sentiment detected (score: {:.2}, {})",
        aggregate.emotion.display_name(),
        aggregate.score,
        confidence_tier(aggregate.confidence)
    )
}

fn confidence_tier(confidence: f64) -> &'static str {
    if confidence > 0.8 {
        "High confidence"
    } else if confidence > 0.6 {
        "Medium confidence"
    } else {
        "Low confidence"
    }
}

/// A close-the-loop alert row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CtlAlert {
    pub tenant_id: TenantId,
    pub form_id: FormId,
    pub submission_id: SubmissionId,
    pub alert_level: AlertLevel,
    pub score_value: f64,
    pub score_type: String,
    pub sentiment: Emotion,
}

impl CtlAlert {
    /// Builds the alert for a submission, or `None` when the score does not
    /// cross a threshold.
    pub fn for_submission(
        tenant_id: TenantId,
        form_id: FormId,
        submission_id: SubmissionId,
        result: &SentimentAnalysisResult,
    ) -> Option<Self> {
        let alert_level = AlertLevel::from_score(result.aggregate.score)?;
        Some(Self {
            tenant_id,
            form_id,
            submission_id,
            alert_level,
            score_value: result.aggregate.score,
            score_type: SENTIMENT_SCORE_TYPE.to_string(),
            sentiment: result.aggregate.emotion,
        })
    }
}
