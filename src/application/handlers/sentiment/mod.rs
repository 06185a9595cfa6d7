//! Sentiment handlers.
//!
//! - `AnalyzeSubmissionHandler` - One submission through the full pipeline
//! - `SentimentBackfill` - Paced batch run over every pending submission

mod analyze_submission;
mod backfill;

pub use analyze_submission::{AnalyzeOutcome, AnalyzeSubmissionCommand, AnalyzeSubmissionHandler};
pub use backfill::{BackfillError, BackfillOptions, BackfillStats, SentimentBackfill};
