//! Isolated snapshots of the availability view.
//!
//! A [`WorkingCopy`] owns its entries. Taking a candidate out of it simulates
//! consuming that resource without touching the store, and a later snapshot
//! of the store is unaffected.

use std::collections::BTreeMap;

use zoo_core::entities::{Animal, ZooKeeper};
use zoo_db::error::DatabaseError;
use zoo_db::store::EntityStore;

use crate::resource::Admissible;

#[derive(Debug, Clone, PartialEq)]
pub struct WorkingCopy<T> {
    entries: BTreeMap<String, T>,
}

impl<T> WorkingCopy<T> {
    #[must_use]
    pub const fn new(entries: BTreeMap<String, T>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.entries.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Remove a candidate. `None` if it was not (or is no longer) present.
    pub fn take(&mut self, id: &str) -> Option<T> {
        self.entries.remove(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }
}

/// Hands out working copies of a store's availability view.
pub struct WorkingCopyProvider<'a, S> {
    store: &'a S,
}

impl<'a, S: EntityStore> WorkingCopyProvider<'a, S> {
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Snapshot the available resources of kind `R` as of now.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the store cannot be read.
    pub async fn snapshot<R: Admissible>(&self) -> Result<WorkingCopy<R>, DatabaseError> {
        let entries = R::available(self.store).await?;
        tracing::debug!(kind = %R::KIND, candidates = entries.len(), "took working copy");
        Ok(WorkingCopy::new(entries))
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the store cannot be read.
    pub async fn animals(&self) -> Result<WorkingCopy<Animal>, DatabaseError> {
        self.snapshot().await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the store cannot be read.
    pub async fn keepers(&self) -> Result<WorkingCopy<ZooKeeper>, DatabaseError> {
        self.snapshot().await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use zoo_core::entities::NewAnimal;
    use zoo_core::enums::{Gender, HealthStatus, Species};
    use zoo_db::memory::MemoryStore;

    use super::*;

    fn fox(id: &str) -> Animal {
        NewAnimal {
            name: "Vixen".into(),
            species: Species::Fox,
            age: 2,
            gender: Gender::Female,
            health: HealthStatus::Healthy,
        }
        .into_animal(id.into(), Utc::now())
    }

    #[tokio::test]
    async fn mutating_a_snapshot_leaves_the_store_alone() {
        let store = MemoryStore::new();
        store.save_animal(&fox("A-0001")).await.unwrap();
        store.save_animal(&fox("A-0002")).await.unwrap();
        let provider = WorkingCopyProvider::new(&store);

        let mut copy = provider.animals().await.unwrap();
        assert!(copy.take("A-0001").is_some());
        assert!(copy.take("A-0001").is_none());
        assert_eq!(copy.len(), 1);

        let fresh = store.available_animals().await.unwrap();
        assert_eq!(fresh.len(), 2);
        assert!(provider.animals().await.unwrap().contains("A-0001"));
    }

    #[tokio::test]
    async fn snapshot_does_not_follow_later_changes() {
        let store = MemoryStore::new();
        store.save_animal(&fox("A-0001")).await.unwrap();
        let copy = WorkingCopyProvider::new(&store).animals().await.unwrap();

        store.delete_animal("A-0001").await.unwrap();

        assert!(copy.contains("A-0001"));
        assert_eq!(copy.get("A-0001").map(|a| a.species), Some(Species::Fox));
    }
}
