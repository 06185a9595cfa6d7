//! In-memory adapters for the persistence ports.
//!
//! Used by tests and for exercising the backfill without a database.

mod ai_provider_reader;
mod ctl_alert_repository;
mod submission_repository;

pub use ai_provider_reader::InMemoryAiProviderReader;
pub use ctl_alert_repository::InMemoryCtlAlertRepository;
pub use submission_repository::InMemorySubmissionRepository;
