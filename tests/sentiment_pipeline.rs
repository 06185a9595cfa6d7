//! Integration tests for the pure sentiment pipeline.
//!
//! answers -> extraction -> prompt -> provider reply -> parser -> alert decision

use serde_json::json;

use cx_sentiment::domain::sentiment::{
    build_sentiment_prompt, ctl_alert_level, extract_text_fields, flag_reason,
    parse_sentiment_response, should_trigger_alert, AlertLevel, Emotion,
};

#[test]
fn positive_feedback_round_trip() {
    let data = json!({"feedback": "This is a great product that I really enjoy using!"});

    let fields = extract_text_fields(Some(&data), None);
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].field_name, "feedback");
    assert_eq!(fields[0].label, "Feedback");

    let prompt = build_sentiment_prompt(&fields);
    assert!(prompt.contains("1. Feedback (feedback):\n\"This is a great product that I really enjoy using!\""));
    assert!(prompt.contains("\"aggregate\""));
    assert!(prompt.contains("Respond with ONLY the JSON object"));

    let reply = r#"{"aggregate":{"score":0.8,"emotion":"happy","confidence":0.9},"fields":{"feedback":{"score":0.8,"confidence":0.9}},"themes":["service quality"],"summary":"Very positive feedback"}"#;
    let result = parse_sentiment_response(reply).expect("reply should parse");

    assert_eq!(result.aggregate.score, 0.8);
    assert_eq!(result.aggregate.emotion, Emotion::Happy);
    assert_eq!(result.aggregate.confidence, 0.9);
    let feedback = result.field("feedback").expect("feedback entry");
    assert_eq!(feedback.score, Some(0.8));
    assert_eq!(feedback.confidence, Some(0.9));
    assert_eq!(result.themes(), vec!["service quality"]);
    assert_eq!(result.summary(), Some("Very positive feedback"));
    assert!(!should_trigger_alert(Some(&result)));
}

#[test]
fn negative_feedback_with_pii_in_survey_pages() {
    let definition = json!({
        "pages": [{
            "name": "page1",
            "elements": [{
                "type": "panel",
                "name": "contactPanel",
                "elements": [{
                    "type": "comment",
                    "name": "complaint",
                    "title": "What went wrong?"
                }]
            }]
        }]
    });
    let data = json!({
        "complaint": {"value": "Nobody answered, call me on 555-987-6543 or mail ana@shop.io"},
        "nps": 2
    });

    let fields = extract_text_fields(Some(&data), Some(&definition));
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].label, "What went wrong?");

    let prompt = build_sentiment_prompt(&fields);
    assert!(prompt.contains("[PHONE]"));
    assert!(prompt.contains("[EMAIL]"));
    assert!(!prompt.contains("ana@shop.io"));

    let reply = "Sure! Here is the analysis:\n```json\n{\"aggregate\":{\"score\":-1.4,\"emotion\":\"frustrated\",\"confidence\":0.7}}\n```";
    let result = parse_sentiment_response(reply).expect("reply should parse");

    assert_eq!(result.aggregate.score, -1.0);
    assert_eq!(result.aggregate.emotion, Emotion::Frustrated);
    assert_eq!(ctl_alert_level(Some(result.aggregate.score)), Some(AlertLevel::Critical));
    assert!(should_trigger_alert(Some(&result)));
    assert_eq!(
        flag_reason(Some(&result)),
        "Frustrated sentiment detected (score: -1.00, Medium confidence)"
    );
}

#[test]
fn nothing_to_analyze_produces_empty_prompt() {
    let data = json!({"rating": 5, "ok": "Fine", "choices": ["a", "b"]});

    let fields = extract_text_fields(Some(&data), None);

    assert!(fields.is_empty());
    assert_eq!(build_sentiment_prompt(&fields), "");
}
