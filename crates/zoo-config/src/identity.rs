//! Identity issuance retry settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const fn default_retry_attempts() -> u32 {
    4
}

const fn default_retry_base_delay_ms() -> u64 {
    50
}

const fn default_retry_max_delay_ms() -> u64 {
    1000
}

/// Backoff applied when issuing an ID fails transiently.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdentityConfig {
    /// Total attempts, including the first.
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,

    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            retry_attempts: default_retry_attempts(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

impl IdentityConfig {
    #[must_use]
    pub const fn base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }

    #[must_use]
    pub const fn max_delay(&self) -> Duration {
        Duration::from_millis(self.retry_max_delay_ms)
    }
}
