//! # zoo-config
//!
//! Layered configuration loading for the zoo records system using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ZOO_*` prefix, `__` as separator)
//! 2. Project-level `.zoo/config.toml`
//! 3. User-level `~/.config/zoo/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ZOO_STORAGE__BACKEND` -> `storage.backend`,
//! `ZOO_ADMISSION__MAX_ATTEMPTS` -> `admission.max_attempts`, etc.
//!
//! # Usage
//!
//! `.env` files are the binary's concern; load them before calling in here.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use zoo_config::ZooConfig;
//!
//! let config = ZooConfig::load_from(Path::new("/srv/zoo")).expect("config");
//! println!("storage: {:?} at {}", config.storage.backend, config.storage.path);
//! ```

mod admission;
mod error;
mod general;
mod identity;
mod storage;

pub use admission::{AdmissionConfig, DEFAULT_MAX_ATTEMPTS};
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use identity::IdentityConfig;
pub use storage::{StorageBackend, StorageConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ZooConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub admission: AdmissionConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl ZooConfig {
    /// Load configuration from all sources relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("."))
    }

    /// Load configuration using `<project_root>/.zoo/config.toml` as the
    /// project layer.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_from(project_root: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_in(project_root).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Provider chain for a project root, lowest priority first.
    fn figment_in(project_root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = project_root.join(".zoo").join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("ZOO_").split("__"))
    }

    /// Reject values the rest of the system cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.admission.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "admission.max_attempts".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.identity.retry_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "identity.retry_attempts".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.storage.is_durable() && self.storage.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.path".into(),
                reason: "the sqlite backend needs a database path".into(),
            });
        }
        Ok(())
    }

    /// Database path resolved against the project root.
    #[must_use]
    pub fn database_path(&self, project_root: &Path) -> PathBuf {
        let path = PathBuf::from(&self.storage.path);
        if path.is_absolute() || self.storage.path == ":memory:" {
            path
        } else {
            project_root.join(path)
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("zoo").join("config.toml"))
    }
}
