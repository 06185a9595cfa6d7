//! Backfill pacing configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Keeps the provider at or below 5 requests per second.
pub const MIN_DELAY_MS: u64 = 200;

const MAX_BATCH_SIZE: u32 = 1000;

/// Backfill configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackfillConfig {
    /// Submissions fetched per page
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,

    /// Pause after every submission, in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl BackfillConfig {
    /// Get per-item delay as Duration
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Validate backfill configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(ValidationError::InvalidBatchSize);
        }
        if self.delay_ms < MIN_DELAY_MS {
            return Err(ValidationError::DelayBelowRateLimit);
        }
        Ok(())
    }
}

impl Default for BackfillConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            delay_ms: default_delay_ms(),
        }
    }
}

fn default_batch_size() -> u32 {
    100
}

fn default_delay_ms() -> u64 {
    MIN_DELAY_MS
}
