//! Text field extraction from submission answers.
//!
//! Walks a submission's answer map and keeps only the free-text answers long
//! enough to carry sentiment. Short strings ("Yes", "N/A", "5") and
//! non-string answers are dropped silently; they are noise, not errors.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::answer::AnswerValue;

/// Answers must be strictly longer than this (in characters, after trimming).
pub const MIN_TEXT_LENGTH: usize = 10;

static CAMEL_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid camel-case regex"));

/// A free-text answer selected for analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedTextField {
    /// Answer key; `parent.child` for answers nested one level deep.
    pub field_name: String,
    /// Question title from the form definition, or a label derived from the key.
    pub label: String,
    /// Trimmed answer text.
    pub text: String,
}

/// Extracts analyzable text fields from a submission's answers.
///
/// `data` is the answer map (anything other than an object yields nothing).
/// `form_definition` is only consulted for question titles. Output order
/// follows the answer map's order.
pub fn extract_text_fields(
    data: Option<&Value>,
    form_definition: Option<&Value>,
) -> Vec<ExtractedTextField> {
    let Some(Value::Object(answers)) = data else {
        return Vec::new();
    };

    let mut fields = Vec::new();

    for (key, raw) in answers {
        match AnswerValue::decode(raw) {
            AnswerValue::Text(text) => {
                if let Some(text) = qualifying_text(text) {
                    fields.push(field(key.clone(), text, form_definition));
                }
            }
            AnswerValue::Record(nested) => {
                for (nested_key, nested_value) in nested {
                    let AnswerValue::Text(text) = AnswerValue::classify(nested_value) else {
                        continue;
                    };
                    if let Some(text) = qualifying_text(text) {
                        let name = format!("{}.{}", key, nested_key);
                        fields.push(field(name, text, form_definition));
                    }
                }
            }
            AnswerValue::Other => {}
        }
    }

    fields
}

fn qualifying_text(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (trimmed.chars().count() > MIN_TEXT_LENGTH).then_some(trimmed)
}

fn field(field_name: String, text: &str, form_definition: Option<&Value>) -> ExtractedTextField {
    let label = form_definition
        .and_then(|definition| find_question_title(definition, &field_name))
        .map(str::to_string)
        .unwrap_or_else(|| humanize_field_name(&field_name));

    ExtractedTextField {
        field_name,
        label,
        text: text.to_string(),
    }
}

/// Looks up the title of the question named `name`.
///
/// Searches `elements` at the top level, inside `pages[]`, and inside
/// nested panels. Titles may be plain strings or localized objects with a
/// `default` entry.
pub fn find_question_title<'a>(definition: &'a Value, name: &str) -> Option<&'a str> {
    let container = definition.as_object()?;

    if let Some(elements) = container.get("elements").and_then(Value::as_array) {
        for element in elements {
            if element.get("name").and_then(Value::as_str) == Some(name) {
                if let Some(title) = element.get("title").and_then(title_text) {
                    return Some(title);
                }
            }
            if let Some(title) = find_question_title(element, name) {
                return Some(title);
            }
        }
    }

    container
        .get("pages")
        .and_then(Value::as_array)
        .and_then(|pages| pages.iter().find_map(|page| find_question_title(page, name)))
}

fn title_text(title: &Value) -> Option<&str> {
    let text = match title {
        Value::String(text) => text.as_str(),
        Value::Object(localized) => localized.get("default")?.as_str()?,
        _ => return None,
    };
    (!text.trim().is_empty()).then_some(text)
}

/// Builds a display label from a field key.
///
/// `overall_experience` -> `Overall Experience`, `whatCouldImprove` ->
/// `What Could Improve`. Besides `_` and `-`, the `.` joining a nested
/// field to its parent is also read as a word break, so `contact.message`
/// -> `Contact Message` rather than `Contact.message`.
pub fn humanize_field_name(name: &str) -> String {
    let spaced = name.replace(['_', '-', '.'], " ");
    let spaced = CAMEL_BOUNDARY.replace_all(&spaced, "$1 $2");

    spaced
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
