//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `sentiment` - Text extraction, redaction, prompt, response parsing and alert classification

pub mod foundation;
pub mod sentiment;
