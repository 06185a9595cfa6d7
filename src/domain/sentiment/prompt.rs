//! Prompt rendering for the sentiment provider.
//!
//! The prompt lists each redacted answer and pins the exact JSON shape the
//! reply must take, so [`parse_sentiment_response`] can read it back.
//!
//! [`parse_sentiment_response`]: super::parse_sentiment_response

use super::extractor::ExtractedTextField;
use super::redaction::redact_pii;
use super::result::Emotion;

/// Renders the sentiment prompt for the given fields.
///
/// Each field's text is redacted before it is embedded. An empty slice
/// yields an empty string; callers must not contact the provider then.
pub fn build_sentiment_prompt(fields: &[ExtractedTextField]) -> String {
    if fields.is_empty() {
        return String::new();
    }

    let responses = fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            format!(
                "{}. {} ({}):\n\"{}\"",
                i + 1,
                field.label,
                field.field_name,
                redact_pii(&field.text)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let emotions = Emotion::ALL
        .iter()
        .map(Emotion::as_str)
        .collect::<Vec<_>>()
        .join(" | ");

    format!(
        r#"Analyze the sentiment of the following customer survey responses.

Responses:

{responses}

Return a JSON object with exactly this structure:
{{
  "aggregate": {{
    "score": <number from -1.0 to 1.0>,
    "emotion": "{emotions}",
    "confidence": <number from 0.0 to 1.0>
  }},
  "fields": {{
    "<field name shown in parentheses>": {{
      "score": <number from -1.0 to 1.0>,
      "emotion": "<emotion>",
      "keywords": ["<keyword>"],
      "confidence": <number from 0.0 to 1.0>
    }}
  }},
  "themes": ["<recurring theme>"],
  "summary": "<one or two sentence summary>"
}}

Scoring guidance:
- -1.0 to -0.6: very negative
- -0.6 to -0.2: negative
- -0.2 to 0.2: neutral
- 0.2 to 0.6: positive
- 0.6 to 1.0: very positive

Respond with ONLY the JSON object. Do not add explanations, markdown or any text outside the JSON."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, label: &str, text: &str) -> ExtractedTextField {
        ExtractedTextField {
            field_name: name.to_string(),
            label: label.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn empty_fields_produce_empty_prompt() {
        assert_eq!(build_sentiment_prompt(&[]), "");
    }

    #[test]
    fn renders_numbered_entries() {
        let prompt = build_sentiment_prompt(&[
            field("feedback", "Feedback", "Great product overall"),
            field("contact.message", "Contact Message", "Please call me back soon"),
        ]);

        assert!(prompt.contains("1. Feedback (feedback):\n\"Great product overall\""));
        assert!(prompt.contains(
            "\"Great product overall\"\n\n2. Contact Message (contact.message):\n\"Please call me back soon\""
        ));
    }

    #[test]
    fn redacts_text_before_embedding() {
        let prompt = build_sentiment_prompt(&[field(
            "feedback",
            "Feedback",
            "Email me at sam@example.com or 555-123-4567",
        )]);

        assert!(prompt.contains("\"Email me at [EMAIL] or [PHONE]\""));
        assert!(!prompt.contains("sam@example.com"));
        assert!(!prompt.contains("555-123-4567"));
    }

    #[test]
    fn includes_schema_bands_and_json_only_instruction() {
        let prompt = build_sentiment_prompt(&[field("f", "F", "Some long enough text")]);

        assert!(prompt.contains("\"aggregate\""));
        assert!(prompt.contains("\"fields\""));
        assert!(prompt.contains("\"themes\""));
        assert!(prompt.contains("\"summary\""));
        assert!(prompt.contains("happy | satisfied | frustrated | angry | disappointed | confused | neutral"));
        assert!(prompt.contains("- -1.0 to -0.6: very negative"));
        assert!(prompt.contains("- 0.6 to 1.0: very positive"));
        assert!(prompt.contains("Respond with ONLY the JSON object"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let fields = [field("a", "A", "Deterministic output please")];
        assert_eq!(build_sentiment_prompt(&fields), build_sentiment_prompt(&fields));
    }
}
