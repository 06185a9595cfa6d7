//! Application handlers.
//!
//! Command handlers that orchestrate domain operations over the ports.

pub mod sentiment;

pub use sentiment::{
    AnalyzeOutcome, AnalyzeSubmissionCommand, AnalyzeSubmissionHandler, BackfillError,
    BackfillOptions, BackfillStats, SentimentBackfill,
};
