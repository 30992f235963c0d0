//! Interactive admission settings.

use serde::{Deserialize, Serialize};

/// Default number of tries the selector grants per prompt.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

const fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdmissionConfig {
    /// Invalid or rejected inputs tolerated before a selection is aborted.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
        }
    }
}
