//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the sentiment pipeline and the outside world. Adapters implement these ports.
//!
//! - `SentimentAnalyzer` - AI service call
//! - `AiProviderReader` - Active AI provider lookup
//! - `SubmissionRepository` - Unanalyzed submission reads and analysis writes
//! - `CtlAlertRepository` - Conflict-safe close-the-loop alert inserts

mod ai_provider_reader;
mod ctl_alert_repository;
mod sentiment_analyzer;
mod submission_repository;

pub use ai_provider_reader::{ActiveAiProvider, AiProviderReader};
pub use ctl_alert_repository::CtlAlertRepository;
pub use sentiment_analyzer::{AIError, AiCredentials, SentimentAnalyzer, SentimentRequest};
pub use submission_repository::SubmissionRepository;
