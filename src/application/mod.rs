//! Application layer - Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    AnalyzeOutcome, AnalyzeSubmissionCommand, AnalyzeSubmissionHandler, BackfillError,
    BackfillOptions, BackfillStats, SentimentBackfill,
};
