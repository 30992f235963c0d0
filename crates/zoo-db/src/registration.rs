//! Registration flows: validate, issue an identifier, persist.
//!
//! Issuance is retried with backoff while it reports `IdentityUnavailable`.
//! Nothing is persisted when validation or issuance fails. A durable ID that
//! was issued but whose record then failed to save is never reused; that
//! leaves a gap in the sequence, which is allowed.

use chrono::Utc;
use zoo_core::entities::{Animal, Enclosure, NewAnimal, NewEnclosure, NewKeeper, ZooKeeper};
use zoo_core::errors::ZooError;
use zoo_core::ids::EntityKind;

use crate::error::DatabaseError;
use crate::identity::IdentityIssuer;
use crate::retry::{RetryConfig, with_retry};
use crate::store::EntityStore;

pub struct Registrar<'a, S> {
    store: &'a S,
    issuer: &'a IdentityIssuer,
    retry: RetryConfig,
}

impl<'a, S: EntityStore> Registrar<'a, S> {
    #[must_use]
    pub fn new(store: &'a S, issuer: &'a IdentityIssuer) -> Self {
        Self {
            store,
            issuer,
            retry: RetryConfig::default(),
        }
    }

    #[must_use]
    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Issue an identifier for any kind, including kinds with no stored entity.
    ///
    /// # Errors
    ///
    /// `IdentityUnavailable` once retries run out, `IdentityCorruption` at once.
    pub async fn issue(&self, kind: EntityKind) -> Result<String, ZooError> {
        with_retry(&self.retry, "issue identity", || self.issuer.issue(kind)).await
    }

    /// # Errors
    ///
    /// `Validation` for bad input, identity errors from issuance, or a store failure.
    pub async fn register_animal(&self, new: NewAnimal) -> Result<Animal, DatabaseError> {
        let new = new.validate()?;
        let id = self.issue(EntityKind::Animal).await?;
        let animal = new.into_animal(id, Utc::now());
        self.store.save_animal(&animal).await?;
        tracing::info!(id = %animal.id, species = %animal.species, "registered animal");
        Ok(animal)
    }

    /// # Errors
    ///
    /// `Validation` for bad input, identity errors from issuance, or a store failure.
    pub async fn register_enclosure(&self, new: NewEnclosure) -> Result<Enclosure, DatabaseError> {
        let new = new.validate()?;
        let id = self.issue(EntityKind::Enclosure).await?;
        let enclosure = new.into_enclosure(id, Utc::now());
        self.store.save_enclosure(&enclosure).await?;
        tracing::info!(id = %enclosure.id, "registered enclosure");
        Ok(enclosure)
    }

    /// # Errors
    ///
    /// `Validation` for bad input, identity errors from issuance, or a store failure.
    pub async fn register_keeper(&self, new: NewKeeper) -> Result<ZooKeeper, DatabaseError> {
        let new = new.validate()?;
        let id = self.issue(EntityKind::ZooKeeper).await?;
        let keeper = new.into_keeper(id, Utc::now());
        self.store.save_keeper(&keeper).await?;
        tracing::info!(id = %keeper.id, department = %keeper.department, "registered keeper");
        Ok(keeper)
    }
}
