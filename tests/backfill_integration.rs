//! Integration tests for the sentiment backfill.
//!
//! These tests drive the full run:
//! 1. Active provider lookup
//! 2. Paging through pending submissions
//! 3. Real HTTP calls to a stubbed AI service
//! 4. Analysis writes and CTL alert inserts
//!
//! Persistence uses the in-memory adapters; the AI service is a wiremock server.

use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cx_sentiment::adapters::ai::{HttpSentimentAnalyzer, HttpSentimentConfig};
use cx_sentiment::adapters::memory::{
    InMemoryAiProviderReader, InMemoryCtlAlertRepository, InMemorySubmissionRepository,
};
use cx_sentiment::application::{
    AnalyzeSubmissionHandler, BackfillError, BackfillOptions, SentimentBackfill,
};
use cx_sentiment::domain::foundation::{FormId, TenantId};
use cx_sentiment::domain::sentiment::{AlertLevel, Emotion, Submission};
use cx_sentiment::ports::SubmissionRepository;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Harness {
    server: MockServer,
    submissions: InMemorySubmissionRepository,
    alerts: InMemoryCtlAlertRepository,
    backfill: SentimentBackfill,
}

async fn harness(providers: InMemoryAiProviderReader) -> Harness {
    let server = MockServer::start().await;
    let analyzer = HttpSentimentAnalyzer::new(
        HttpSentimentConfig::new(server.uri()).with_timeout(Duration::from_secs(2)),
    )
    .unwrap();

    let submissions = InMemorySubmissionRepository::new();
    let alerts = InMemoryCtlAlertRepository::new();
    let handler = AnalyzeSubmissionHandler::new(
        Arc::new(analyzer),
        Arc::new(submissions.clone()),
        Arc::new(alerts.clone()),
    );
    let backfill =
        SentimentBackfill::new(Arc::new(providers), Arc::new(submissions.clone()), handler);

    Harness {
        server,
        submissions,
        alerts,
        backfill,
    }
}

fn active_provider() -> InMemoryAiProviderReader {
    InMemoryAiProviderReader::with_provider("anthropic", "sk-ant-test")
}

fn options() -> BackfillOptions {
    BackfillOptions {
        delay: Duration::ZERO,
        model: "claude-3-haiku".to_string(),
        ..Default::default()
    }
}

fn submission(data: Value) -> Submission {
    Submission::new(TenantId::new(), FormId::new(), data)
}

/// Replies with `sentiment` to prompts containing `marker`.
async fn reply_for(server: &MockServer, marker: &str, sentiment: Value) {
    Mock::given(method("POST"))
        .and(path("/analyze-sentiment"))
        .and(body_string_contains(marker))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sentiment": sentiment })))
        .mount(server)
        .await;
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn backfill_analyzes_flags_and_counts() {
    let h = harness(active_provider()).await;

    reply_for(
        &h.server,
        "refund",
        json!(r#"{"aggregate":{"score":-0.75,"emotion":"angry","confidence":0.85},"themes":["refunds"],"summary":"Angry about refund","nextStep":"call back"}"#),
    )
    .await;
    reply_for(
        &h.server,
        "onboarding",
        json!({"aggregate": {"score": 0.6, "emotion": "happy", "confidence": 0.9}}),
    )
    .await;
    Mock::given(method("POST"))
        .and(body_string_contains("checkout"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&h.server)
        .await;

    let angry = submission(json!({"comment": "Still waiting for my refund after six weeks"}));
    let happy = submission(json!({"comment": "The onboarding call was genuinely helpful"}));
    let failing = submission(json!({"comment": "The checkout page froze on my phone"}));
    let empty = submission(json!({"rating": 3, "ok": "fine"}));
    for s in [&angry, &happy, &failing, &empty] {
        h.submissions.insert((*s).clone()).await;
    }

    let stats = h.backfill.run(&options()).await.unwrap();

    assert_eq!(stats.total, 4);
    assert_eq!(stats.processed, 4);
    assert_eq!(stats.success, 2);
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.failed, 1);
    assert!((stats.success_rate() - 50.0).abs() < 1e-9);

    let stored = h.submissions.analysis_of(&angry.id).await.unwrap();
    assert_eq!(stored["provider"], "anthropic");
    assert_eq!(stored["sentiment"]["aggregate"]["score"], -0.75);
    assert_eq!(stored["sentiment"]["flagged"], true);
    assert_eq!(stored["sentiment"]["alertLevel"], "critical");
    assert_eq!(stored["sentiment"]["themes"], json!(["refunds"]));
    assert_eq!(stored["sentiment"]["nextStep"], "call back");

    let stored = h.submissions.analysis_of(&happy.id).await.unwrap();
    assert_eq!(stored["sentiment"]["flagged"], false);

    assert!(h.submissions.analysis_of(&failing.id).await.is_none());
    assert!(h.submissions.analysis_of(&empty.id).await.is_none());

    let alerts = h.alerts.alerts().await;
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].submission_id, angry.id);
    assert_eq!(alerts[0].alert_level, AlertLevel::Critical);
    assert_eq!(alerts[0].sentiment, Emotion::Angry);

    // The no-text and failed rows stay pending for the next run
    assert_eq!(h.submissions.count_unanalyzed().await.unwrap(), 2);
}

#[tokio::test]
async fn rerun_only_touches_pending_rows_and_never_duplicates_alerts() {
    let h = harness(active_provider()).await;
    reply_for(
        &h.server,
        "refund",
        json!({"aggregate": {"score": -0.9, "emotion": "angry", "confidence": 0.9}}),
    )
    .await;

    let angry = submission(json!({"comment": "Still waiting for my refund after six weeks"}));
    h.submissions.insert(angry.clone()).await;

    let first = h.backfill.run(&options()).await.unwrap();
    let second = h.backfill.run(&options()).await.unwrap();

    assert_eq!(first.success, 1);
    assert_eq!(second.total, 0);
    assert_eq!(h.alerts.alerts().await.len(), 1);
    assert_eq!(h.server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn request_carries_prompt_and_provider_credentials() {
    let h = harness(active_provider()).await;
    reply_for(&h.server, "refund", json!({"aggregate": {"score": 0.0}})).await;
    h.submissions
        .insert(submission(json!({"comment": "Where is my refund? Email me at a.b@c.com"})))
        .await;

    h.backfill.run(&options()).await.unwrap();

    let requests = h.server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["aiConfig"]["provider"], "anthropic");
    assert_eq!(body["aiConfig"]["apiKey"], "sk-ant-test");
    assert_eq!(body["aiConfig"]["model"], "claude-3-haiku");
    let prompt = body["prompt"].as_str().unwrap();
    assert!(prompt.contains("Comment (comment)"));
    assert!(prompt.contains("[EMAIL]"));
    assert!(!prompt.contains("a.b@c.com"));
}

#[tokio::test]
async fn dry_run_calls_service_but_writes_nothing() {
    let h = harness(active_provider()).await;
    reply_for(
        &h.server,
        "refund",
        json!({"aggregate": {"score": -0.9, "emotion": "angry", "confidence": 0.9}}),
    )
    .await;
    h.submissions
        .insert(submission(json!({"comment": "Still waiting for my refund after six weeks"})))
        .await;

    let stats = h
        .backfill
        .run(&BackfillOptions {
            dry_run: true,
            ..options()
        })
        .await
        .unwrap();

    assert_eq!(stats.success, 1);
    assert_eq!(h.server.received_requests().await.unwrap().len(), 1);
    assert_eq!(h.submissions.count_unanalyzed().await.unwrap(), 1);
    assert!(h.alerts.alerts().await.is_empty());
}

#[tokio::test]
async fn missing_provider_aborts_before_any_call() {
    let h = harness(InMemoryAiProviderReader::default()).await;
    h.submissions
        .insert(submission(json!({"comment": "Still waiting for my refund after six weeks"})))
        .await;

    let err = h.backfill.run(&options()).await.unwrap_err();

    assert!(matches!(err, BackfillError::NoActiveProvider));
    assert!(h.server.received_requests().await.unwrap().is_empty());
}
