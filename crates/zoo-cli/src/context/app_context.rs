use std::path::PathBuf;

use anyhow::Context;
use zoo_admission::BoundedRetrySelector;
use zoo_config::ZooConfig;
use zoo_db::identity::IdentityIssuer;
use zoo_db::memory::MemoryStore;
use zoo_db::registration::Registrar;
use zoo_db::retry::RetryConfig;
use zoo_db::service::ZooService;
use zoo_db::store::EntityStore;

/// Shared application resources initialized once at startup.
///
/// The issuer always matches the store: the libSQL service gets the
/// row-locked counters in the same database, the memory store gets
/// process-local counters.
pub struct AppContext<S> {
    pub store: S,
    pub issuer: IdentityIssuer,
    pub config: ZooConfig,
    pub project_root: PathBuf,
}

impl AppContext<ZooService> {
    /// Open (and migrate) the project database.
    pub async fn open_durable(project_root: PathBuf, config: ZooConfig) -> anyhow::Result<Self> {
        let db_path = config.database_path(&project_root);
        if let Some(parent) = db_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let db_path_str = db_path.to_string_lossy();
        tracing::debug!(path = %db_path_str, "opening zoo database");
        let store = ZooService::new_local(&db_path_str)
            .await
            .context("failed to initialize zoo-db service")?;
        let issuer = store.identity_issuer();

        Ok(Self {
            store,
            issuer,
            config,
            project_root,
        })
    }
}

impl AppContext<MemoryStore> {
    pub fn in_memory(project_root: PathBuf, config: ZooConfig) -> Self {
        let store = MemoryStore::new();
        let issuer = store.identity_issuer();
        Self {
            store,
            issuer,
            config,
            project_root,
        }
    }
}

impl<S: EntityStore> AppContext<S> {
    pub fn retry_config(&self) -> RetryConfig {
        let identity = &self.config.identity;
        RetryConfig {
            max_attempts: identity.retry_attempts,
            base_delay: identity.base_delay(),
            max_delay: identity.max_delay(),
        }
    }

    pub fn registrar(&self) -> Registrar<'_, S> {
        Registrar::new(&self.store, &self.issuer).with_retry_config(self.retry_config())
    }

    pub fn selector(&self) -> BoundedRetrySelector {
        BoundedRetrySelector::new(self.config.admission.max_attempts)
    }
}
