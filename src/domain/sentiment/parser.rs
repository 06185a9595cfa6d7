//! Parsing and normalization of the provider's sentiment reply.
//!
//! Providers are asked for bare JSON but regularly wrap it in prose or code
//! fences. The parser cuts out the outermost `{...}`, decodes it, and then
//! repairs what it can in place: scores and confidences are clamped, an
//! unknown aggregate emotion becomes `neutral`. Everything else, including
//! keys it does not know, is kept as sent. The only thing it cannot repair is
//! a missing `aggregate.score`; without it the whole reply is rejected.

use serde_json::{Map, Value};
use tracing::debug;

use super::normalize::{clamp_confidence_value, clamp_score, clamp_score_value};
use super::result::{Emotion, SentimentAggregate, SentimentAnalysisResult};

/// Parses raw provider text into a normalized result.
///
/// Returns `None` when no JSON object can be decoded or `aggregate.score`
/// is not a number. Never panics on malformed input.
pub fn parse_sentiment_response(raw: &str) -> Option<SentimentAnalysisResult> {
    let candidate = embedded_json_object(raw);

    let value: Value = match serde_json::from_str(candidate) {
        Ok(value) => value,
        Err(err) => {
            debug!(error = %err, "sentiment response is not valid JSON");
            return None;
        }
    };

    normalize_sentiment_value(&value)
}

/// Normalizes an already-decoded provider reply.
///
/// A JSON string is treated as raw text and parsed; an object is
/// normalized directly.
pub fn normalize_sentiment_value(value: &Value) -> Option<SentimentAnalysisResult> {
    let root = match value {
        Value::String(text) => return parse_sentiment_response(text),
        Value::Object(root) => root,
        _ => return None,
    };

    let mut extra = root.clone();
    let aggregate = match extra.remove("aggregate") {
        Some(Value::Object(aggregate)) => aggregate,
        _ => return None,
    };
    let Some(aggregate) = normalize_aggregate(aggregate) else {
        debug!("sentiment response has no numeric aggregate.score");
        return None;
    };
    let fields = match extra.remove("fields") {
        Some(Value::Object(fields)) => normalize_fields(fields),
        _ => Map::new(),
    };

    Some(SentimentAnalysisResult {
        aggregate,
        fields,
        extra,
    })
}

fn embedded_json_object(raw: &str) -> &str {
    let trimmed = raw.trim();
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}

fn normalize_aggregate(mut aggregate: Map<String, Value>) -> Option<SentimentAggregate> {
    let score = aggregate.remove("score")?.as_f64()?;
    let emotion = aggregate.remove("emotion");
    let confidence = aggregate.remove("confidence");

    Some(SentimentAggregate {
        score: clamp_score(score),
        emotion: Emotion::coerce(emotion.as_ref()),
        confidence: clamp_confidence_value(confidence.as_ref()),
        extra: aggregate,
    })
}

// Entries keep their position; only object entries are touched.
fn normalize_fields(mut fields: Map<String, Value>) -> Map<String, Value> {
    for entry in fields.values_mut() {
        if let Value::Object(entry) = entry {
            if let Some(score) = entry.get_mut("score") {
                *score = Value::from(clamp_score_value(Some(&*score)));
            }
            if let Some(confidence) = entry.get_mut("confidence") {
                *confidence = Value::from(clamp_confidence_value(Some(&*confidence)));
            }
        }
    }
    fields
}
