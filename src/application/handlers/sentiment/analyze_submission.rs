//! AnalyzeSubmissionHandler - Runs the sentiment pipeline for one submission.
//!
//! extract text -> prompt -> AI service -> normalize -> persist -> alert
//!
//! Input-shape problems and provider failures are reported as outcomes.
//! Only persistence errors are returned as `Err`.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::foundation::DomainError;
use crate::domain::sentiment::{
    build_sentiment_prompt, extract_text_fields, normalize_sentiment_value, AlertLevel, CtlAlert,
    SentimentAnalysisResult, Submission, SubmissionAnalysis,
};
use crate::ports::{
    AIError, AiCredentials, CtlAlertRepository, SentimentAnalyzer, SentimentRequest,
    SubmissionRepository,
};

/// Command to analyze a single submission.
#[derive(Debug, Clone)]
pub struct AnalyzeSubmissionCommand {
    pub submission: Submission,
    pub credentials: AiCredentials,
    /// Run the AI call but write nothing.
    pub dry_run: bool,
}

/// What happened to a submission.
#[derive(Debug)]
pub enum AnalyzeOutcome {
    /// Result produced; `persisted` is false in dry-run mode.
    Analyzed {
        result: SentimentAnalysisResult,
        alert_level: Option<AlertLevel>,
        persisted: bool,
    },
    /// No answer long enough to analyze.
    NoText,
    /// The AI service call failed.
    ProviderFailed(AIError),
    /// The reply held no usable sentiment JSON.
    Unparseable,
}

impl AnalyzeOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            AnalyzeOutcome::Analyzed { .. } => "analyzed",
            AnalyzeOutcome::NoText => "no_text",
            AnalyzeOutcome::ProviderFailed(_) => "provider_failed",
            AnalyzeOutcome::Unparseable => "unparseable",
        }
    }

    /// Whether the submission still lacks a stored sentiment afterwards.
    pub fn leaves_pending(&self) -> bool {
        !matches!(self, AnalyzeOutcome::Analyzed { persisted: true, .. })
    }
}

/// Handler for single-submission sentiment analysis.
pub struct AnalyzeSubmissionHandler {
    analyzer: Arc<dyn SentimentAnalyzer>,
    submissions: Arc<dyn SubmissionRepository>,
    alerts: Arc<dyn CtlAlertRepository>,
}

impl AnalyzeSubmissionHandler {
    pub fn new(
        analyzer: Arc<dyn SentimentAnalyzer>,
        submissions: Arc<dyn SubmissionRepository>,
        alerts: Arc<dyn CtlAlertRepository>,
    ) -> Self {
        Self {
            analyzer,
            submissions,
            alerts,
        }
    }

    pub async fn handle(
        &self,
        cmd: AnalyzeSubmissionCommand,
    ) -> Result<AnalyzeOutcome, DomainError> {
        let submission = &cmd.submission;

        // 1. Collect analyzable answers
        let fields =
            extract_text_fields(Some(&submission.data), submission.form_definition.as_ref());
        if fields.is_empty() {
            return Ok(AnalyzeOutcome::NoText);
        }

        // 2. Ask the AI service
        let prompt = build_sentiment_prompt(&fields);
        let request = SentimentRequest::new(prompt, cmd.credentials.clone());
        let reply = match self.analyzer.analyze(&request).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(submission_id = %submission.id, error = %e, "Sentiment request failed");
                return Ok(AnalyzeOutcome::ProviderFailed(e));
            }
        };

        // 3. Normalize
        let Some(result) = normalize_sentiment_value(&reply) else {
            debug!(submission_id = %submission.id, "Sentiment reply was not usable JSON");
            return Ok(AnalyzeOutcome::Unparseable);
        };

        let alert_level = AlertLevel::from_score(result.aggregate.score);

        if cmd.dry_run {
            return Ok(AnalyzeOutcome::Analyzed {
                result,
                alert_level,
                persisted: false,
            });
        }

        // 4. Persist, then alert. Not atomic: a re-run reselects the row only
        // if the first statement failed, and the insert ignores duplicates.
        let analysis = SubmissionAnalysis::new(cmd.credentials.provider.clone(), result.clone());
        self.submissions.save_analysis(&submission.id, &analysis).await?;
        debug!(
            submission_id = %submission.id,
            flagged = analysis.is_flagged(),
            "Analysis stored"
        );

        if let Some(alert) = CtlAlert::for_submission(
            submission.tenant_id,
            submission.form_id,
            submission.id,
            &result,
        ) {
            let inserted = self.alerts.insert_if_absent(&alert).await?;
            debug!(
                submission_id = %submission.id,
                alert_level = %alert.alert_level,
                inserted,
                "CTL alert recorded"
            );
        }

        Ok(AnalyzeOutcome::Analyzed {
            result,
            alert_level,
            persisted: true,
        })
    }
}
