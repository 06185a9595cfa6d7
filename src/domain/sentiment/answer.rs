//! Decoding of raw submission answers.
//!
//! Answers arrive as arbitrary JSON. Survey widgets wrap some values as
//! `{ "value": ..., "text": ... }`, composite questions produce a flat
//! object of sub-answers, and everything else is a scalar. Extraction
//! only cares about three shapes, so the raw value is decoded once into
//! [`AnswerValue`] and matched on from there.

use serde_json::{Map, Value};

/// Key that marks a widget wrapper object.
const WRAPPER_KEY: &str = "value";

/// An answer after the one-level wrapper unwrap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnswerValue<'a> {
    /// Free text.
    Text(&'a str),
    /// Composite answer whose members may hold text.
    Record(&'a Map<String, Value>),
    /// Numbers, booleans, arrays, null.
    Other,
}

impl<'a> AnswerValue<'a> {
    /// Decodes a raw answer, unwrapping `{value: ...}` exactly once.
    pub fn decode(raw: &'a Value) -> Self {
        Self::classify(unwrap_widget(raw))
    }

    /// Classifies a value without unwrapping.
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::String(text) => AnswerValue::Text(text),
            Value::Object(map) => AnswerValue::Record(map),
            _ => AnswerValue::Other,
        }
    }
}

fn unwrap_widget(raw: &Value) -> &Value {
    match raw {
        Value::Object(map) => map.get(WRAPPER_KEY).unwrap_or(raw),
        other => other,
    }
}
