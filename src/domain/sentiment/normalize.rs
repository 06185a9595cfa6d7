//! Numeric normalization for provider-supplied scores.
//!
//! Scores default to neutral (`0.0`) while confidences default to the
//! middle of the range (`0.5`) when the provider omits them or sends
//! something that is not a number.

use serde_json::Value;

/// Lower bound of the sentiment score range.
pub const SCORE_MIN: f64 = -1.0;
/// Upper bound of the sentiment score range.
pub const SCORE_MAX: f64 = 1.0;
/// Confidence assumed when none is usable.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Clamps a score into `[-1, 1]`; missing or NaN becomes `0`.
pub fn clamp_score(raw: impl Into<Option<f64>>) -> f64 {
    match raw.into() {
        Some(x) if !x.is_nan() => x.clamp(SCORE_MIN, SCORE_MAX),
        _ => 0.0,
    }
}

/// Clamps a confidence into `[0, 1]`; missing or NaN becomes `0.5`.
pub fn clamp_confidence(raw: impl Into<Option<f64>>) -> f64 {
    match raw.into() {
        Some(x) if !x.is_nan() => x.clamp(0.0, 1.0),
        _ => DEFAULT_CONFIDENCE,
    }
}

/// [`clamp_score`] over a JSON value; only JSON numbers count as numeric.
pub fn clamp_score_value(value: Option<&Value>) -> f64 {
    clamp_score(value.and_then(Value::as_f64))
}

/// [`clamp_confidence`] over a JSON value; only JSON numbers count as numeric.
pub fn clamp_confidence_value(value: Option<&Value>) -> f64 {
    clamp_confidence(value.and_then(Value::as_f64))
}
