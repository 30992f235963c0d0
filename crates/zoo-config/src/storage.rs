//! Storage backend configuration.

use serde::{Deserialize, Serialize};

/// Which store holds authoritative records.
///
/// The identity issuer follows the backend: `sqlite` uses the durable,
/// row-locked counters and `memory` uses process-local counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Memory,
}

fn default_path() -> String {
    ".zoo/zoo.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Database file for the `sqlite` backend. Relative paths resolve
    /// against the project root.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_path(),
        }
    }
}

impl StorageConfig {
    #[must_use]
    pub fn is_durable(&self) -> bool {
        self.backend == StorageBackend::Sqlite
    }
}
