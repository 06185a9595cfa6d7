//! SentimentBackfill - Batch job that analyzes every pending submission.
//!
//! # Run
//!
//! 1. Resolve the active AI provider (fatal if none)
//! 2. Count pending submissions, capped by the optional limit
//! 3. Page through them newest-first, one submission at a time
//! 4. Sleep a fixed delay after every submission
//!
//! Writes happen per submission, so an interrupted run leaves committed rows
//! behind and a re-run picks up where it stopped.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{info, warn};

use crate::domain::foundation::DomainError;
use crate::ports::{AiCredentials, AiProviderReader, SubmissionRepository};

use super::analyze_submission::{
    AnalyzeOutcome, AnalyzeSubmissionCommand, AnalyzeSubmissionHandler,
};

/// Fatal backfill errors.
#[derive(Debug, Error)]
pub enum BackfillError {
    #[error("no active AI provider configured")]
    NoActiveProvider,

    #[error("persistence failed: {0}")]
    Persistence(#[from] DomainError),
}

/// Run options.
#[derive(Debug, Clone)]
pub struct BackfillOptions {
    /// Upper bound on submissions processed.
    pub limit: Option<u64>,
    pub dry_run: bool,
    pub batch_size: u32,
    /// Pause after every submission.
    pub delay: Duration,
    /// Model forwarded to the AI service.
    pub model: String,
}

impl Default for BackfillOptions {
    fn default() -> Self {
        Self {
            limit: None,
            dry_run: false,
            batch_size: 100,
            delay: Duration::from_millis(200),
            model: "gpt-4o-mini".to_string(),
        }
    }
}

/// Counters for a backfill run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackfillStats {
    pub total: u64,
    pub processed: u64,
    pub success: u64,
    /// No analyzable text.
    pub skipped: u64,
    /// Provider error or unusable reply.
    pub failed: u64,
    pub elapsed: Duration,
}

impl BackfillStats {
    /// Percentage of processed submissions that produced a result.
    pub fn success_rate(&self) -> f64 {
        if self.processed == 0 {
            0.0
        } else {
            self.success as f64 / self.processed as f64 * 100.0
        }
    }

    /// Time to process `total` submissions at the observed pace, or at
    /// `per_item` when nothing has been processed yet.
    pub fn estimated_duration(&self, per_item: Duration) -> Duration {
        let per_item = if self.processed == 0 {
            per_item
        } else {
            self.elapsed.div_f64(self.processed as f64)
        };
        per_item.mul_f64(self.total as f64)
    }

    fn record(&mut self, outcome: &AnalyzeOutcome) {
        self.processed += 1;
        match outcome {
            AnalyzeOutcome::Analyzed { .. } => self.success += 1,
            AnalyzeOutcome::NoText => self.skipped += 1,
            AnalyzeOutcome::ProviderFailed(_) | AnalyzeOutcome::Unparseable => self.failed += 1,
        }
    }
}

impl fmt::Display for BackfillStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total:        {}", self.total)?;
        writeln!(f, "Processed:    {}", self.processed)?;
        writeln!(f, "Success:      {}", self.success)?;
        writeln!(f, "Skipped:      {}", self.skipped)?;
        writeln!(f, "Failed:       {}", self.failed)?;
        write!(f, "Success rate: {:.1}%", self.success_rate())
    }
}

/// The backfill driver.
pub struct SentimentBackfill {
    providers: Arc<dyn AiProviderReader>,
    submissions: Arc<dyn SubmissionRepository>,
    handler: AnalyzeSubmissionHandler,
}

impl SentimentBackfill {
    pub fn new(
        providers: Arc<dyn AiProviderReader>,
        submissions: Arc<dyn SubmissionRepository>,
        handler: AnalyzeSubmissionHandler,
    ) -> Self {
        Self {
            providers,
            submissions,
            handler,
        }
    }

    pub async fn run(&self, options: &BackfillOptions) -> Result<BackfillStats, BackfillError> {
        let started = Instant::now();

        let provider = self
            .providers
            .find_active()
            .await?
            .ok_or(BackfillError::NoActiveProvider)?;
        info!(
            provider = %provider.provider,
            model = %options.model,
            dry_run = options.dry_run,
            "Starting sentiment backfill"
        );
        let credentials =
            AiCredentials::new(provider.provider, provider.api_key, options.model.clone());

        let pending = self.submissions.count_unanalyzed().await?;
        let total = options.limit.map_or(pending, |limit| pending.min(limit));
        let mut stats = BackfillStats {
            total,
            ..Default::default()
        };

        if total == 0 {
            info!("No submissions need sentiment analysis");
            return Ok(stats);
        }
        info!(pending, total, "Submissions to analyze");

        // Only rows still pending after a batch shift the window.
        let mut offset: u64 = 0;

        while stats.processed < total {
            let remaining = total - stats.processed;
            let page = u32::try_from(remaining)
                .unwrap_or(u32::MAX)
                .min(options.batch_size.max(1));

            let batch = self.submissions.find_unanalyzed(page, offset).await?;
            if batch.is_empty() {
                warn!(
                    processed = stats.processed,
                    total,
                    "Ran out of submissions before reaching total"
                );
                break;
            }

            for submission in batch {
                let submission_id = submission.id;
                let outcome = self
                    .handler
                    .handle(AnalyzeSubmissionCommand {
                        submission,
                        credentials: credentials.clone(),
                        dry_run: options.dry_run,
                    })
                    .await?;

                stats.record(&outcome);
                if outcome.leaves_pending() {
                    offset += 1;
                }

                match &outcome {
                    AnalyzeOutcome::Analyzed { alert_level, .. } => info!(
                        submission_id = %submission_id,
                        alert_level = alert_level.map(|l| l.as_str()).unwrap_or("none"),
                        processed = stats.processed,
                        total,
                        "Analyzed submission"
                    ),
                    other => info!(
                        submission_id = %submission_id,
                        outcome = other.label(),
                        processed = stats.processed,
                        total,
                        "Submission not analyzed"
                    ),
                }

                if !options.delay.is_zero() {
                    tokio::time::sleep(options.delay).await;
                }
            }
        }

        stats.elapsed = started.elapsed();
        info!(
            total = stats.total,
            processed = stats.processed,
            success = stats.success,
            skipped = stats.skipped,
            failed = stats.failed,
            "Sentiment backfill finished"
        );

        Ok(stats)
    }
}
