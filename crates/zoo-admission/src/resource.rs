//! Resources that can be admitted to an enclosure.

use std::collections::BTreeMap;

use zoo_core::entities::{Animal, ZooKeeper};
use zoo_core::ids::EntityKind;
use zoo_db::error::DatabaseError;
use zoo_db::store::EntityStore;

/// An entity with an availability view and a single authoritative commit
/// operation that binds it to an enclosure.
#[allow(async_fn_in_trait)]
pub trait Admissible: Clone {
    const KIND: EntityKind;

    /// Short human label shown next to the ID while selecting.
    fn label(&self) -> String;

    /// The store's current availability view for this kind.
    async fn available<S: EntityStore>(store: &S) -> Result<BTreeMap<String, Self>, DatabaseError>;

    /// Bind `id` to `enclosure_id` in the store.
    async fn commit<S: EntityStore>(store: &S, enclosure_id: &str, id: &str) -> Result<(), DatabaseError>;
}

impl Admissible for Animal {
    const KIND: EntityKind = EntityKind::Animal;

    fn label(&self) -> String {
        format!("{} ({}, {})", self.name, self.species, self.health)
    }

    async fn available<S: EntityStore>(store: &S) -> Result<BTreeMap<String, Self>, DatabaseError> {
        store.available_animals().await
    }

    async fn commit<S: EntityStore>(store: &S, enclosure_id: &str, id: &str) -> Result<(), DatabaseError> {
        store.remove_available(id, enclosure_id).await
    }
}

impl Admissible for ZooKeeper {
    const KIND: EntityKind = EntityKind::ZooKeeper;

    fn label(&self) -> String {
        format!("{} ({} {})", self.name, self.department, self.rank)
    }

    async fn available<S: EntityStore>(store: &S) -> Result<BTreeMap<String, Self>, DatabaseError> {
        store.available_keepers().await
    }

    async fn commit<S: EntityStore>(store: &S, enclosure_id: &str, id: &str) -> Result<(), DatabaseError> {
        store.assign_caretaker(enclosure_id, id).await
    }
}
