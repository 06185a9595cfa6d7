//! Canonical sentiment analysis record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Overall emotion of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Satisfied,
    Frustrated,
    Angry,
    Disappointed,
    Confused,
    #[default]
    Neutral,
}

impl Emotion {
    /// Every emotion, in the order they are listed to the provider.
    pub const ALL: [Emotion; 7] = [
        Emotion::Happy,
        Emotion::Satisfied,
        Emotion::Frustrated,
        Emotion::Angry,
        Emotion::Disappointed,
        Emotion::Confused,
        Emotion::Neutral,
    ];

    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Satisfied => "satisfied",
            Emotion::Frustrated => "frustrated",
            Emotion::Angry => "angry",
            Emotion::Disappointed => "disappointed",
            Emotion::Confused => "confused",
            Emotion::Neutral => "neutral",
        }
    }

    /// Wire name with the first letter capitalized.
    pub fn display_name(&self) -> &'static str {
        match self {
            Emotion::Happy => "Happy",
            Emotion::Satisfied => "Satisfied",
            Emotion::Frustrated => "Frustrated",
            Emotion::Angry => "Angry",
            Emotion::Disappointed => "Disappointed",
            Emotion::Confused => "Confused",
            Emotion::Neutral => "Neutral",
        }
    }

    /// Reads a provider emotion, coercing anything unrecognized to `Neutral`.
    ///
    /// Matching is exact: `"Angry"` is not a wire name and becomes `Neutral`.
    pub fn coerce(raw: Option<&Value>) -> Self {
        raw.and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for Emotion {
    type Err = UnknownEmotion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Emotion::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| UnknownEmotion(s.to_string()))
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emotion label outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown emotion: {0}")]
pub struct UnknownEmotion(pub String);

/// Submission-wide sentiment. Score in `[-1, 1]`, confidence in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentAggregate {
    pub score: f64,
    pub emotion: Emotion,
    pub confidence: f64,
    /// Provider keys this record does not model, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SentimentAggregate {
    pub fn new(score: f64, emotion: Emotion, confidence: f64) -> Self {
        Self {
            score,
            emotion,
            confidence,
            extra: Map::new(),
        }
    }
}

/// Typed view of one entry in [`SentimentAnalysisResult::fields`].
///
/// Sub-fields the provider left out stay out. Emotion is kept as the
/// provider wrote it; non-string keywords are not part of the view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FieldSentiment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Provider keys this record does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FieldSentiment {
    /// Reads a field entry. Returns `None` for entries that are not objects.
    pub fn from_entry(entry: &Value) -> Option<Self> {
        let mut extra = entry.as_object()?.clone();
        let score = extra.remove("score");
        let emotion = extra.remove("emotion");
        let keywords = extra.remove("keywords");
        let confidence = extra.remove("confidence");

        Some(Self {
            score: score.as_ref().and_then(Value::as_f64),
            emotion: emotion.as_ref().and_then(Value::as_str).map(str::to_string),
            keywords: keywords
                .as_ref()
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            confidence: confidence.as_ref().and_then(Value::as_f64),
            extra,
        })
    }
}

/// Normalized result for one submission.
///
/// Only the aggregate is typed. Per-field entries keep the provider's order
/// and shape (object entries get their score and confidence clamped), and
/// every other top-level member, `themes` and `summary` included, is kept
/// exactly as the provider sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentAnalysisResult {
    pub aggregate: SentimentAggregate,
    #[serde(default)]
    pub fields: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SentimentAnalysisResult {
    /// A result with only the aggregate filled in.
    pub fn from_aggregate(score: f64, emotion: Emotion, confidence: f64) -> Self {
        Self {
            aggregate: SentimentAggregate::new(score, emotion, confidence),
            fields: Map::new(),
            extra: Map::new(),
        }
    }

    /// Typed view of the entry for `name`, if it is an object.
    pub fn field(&self, name: &str) -> Option<FieldSentiment> {
        self.fields.get(name).and_then(FieldSentiment::from_entry)
    }

    /// String entries of `themes`.
    pub fn themes(&self) -> Vec<&str> {
        self.extra
            .get("themes")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// `summary`, when the provider sent a string.
    pub fn summary(&self) -> Option<&str> {
        self.extra.get("summary").and_then(Value::as_str)
    }
}
