//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps and error types used across the
//! sentiment pipeline.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode};
pub use ids::{FormId, SubmissionId, TenantId};
pub use timestamp::Timestamp;
