//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - AI service client and mock
//! - `postgres` - sqlx-backed persistence
//! - `memory` - In-memory persistence for tests

pub mod ai;
pub mod memory;
pub mod postgres;
