//! The store contract shared by the libSQL and in-memory backends.
//!
//! Besides plain CRUD, the contract owns the availability view: the animals
//! that sit in no enclosure and the keepers that can take on work.
//! [`EntityStore::remove_available`] and [`EntityStore::assign_caretaker`]
//! are the only writers of enclosure membership and caretaker links, and
//! each updates both sides of its relation in a single step.

use std::collections::BTreeMap;

use zoo_core::entities::{Animal, Enclosure, ZooKeeper};
use zoo_core::enums::{Department, Species};

use crate::error::DatabaseError;
use crate::updates::animal::AnimalUpdate;
use crate::updates::enclosure::EnclosureUpdate;
use crate::updates::keeper::KeeperUpdate;

#[allow(async_fn_in_trait)]
pub trait EntityStore {
    // -- animals ----------------------------------------------------------

    /// Persist a newly registered animal. It must be unassigned.
    async fn save_animal(&self, animal: &Animal) -> Result<(), DatabaseError>;
    async fn find_animal(&self, id: &str) -> Result<Option<Animal>, DatabaseError>;
    async fn update_animal(&self, id: &str, update: AnimalUpdate) -> Result<Animal, DatabaseError>;
    /// Delete an animal, dropping it from its enclosure's inhabitants.
    /// Returns whether a record was removed.
    async fn delete_animal(&self, id: &str) -> Result<bool, DatabaseError>;
    async fn animal_exists(&self, id: &str) -> Result<bool, DatabaseError>;
    async fn list_animals(&self) -> Result<Vec<Animal>, DatabaseError>;
    async fn list_animals_by_species(&self, species: Species) -> Result<Vec<Animal>, DatabaseError>;

    // -- enclosures -------------------------------------------------------

    /// Persist a newly registered enclosure. It must be empty and unstaffed.
    async fn save_enclosure(&self, enclosure: &Enclosure) -> Result<(), DatabaseError>;
    async fn find_enclosure(&self, id: &str) -> Result<Option<Enclosure>, DatabaseError>;
    async fn update_enclosure(
        &self,
        id: &str,
        update: EnclosureUpdate,
    ) -> Result<Enclosure, DatabaseError>;
    /// Delete an enclosure, releasing its animals and dropping its caretaker links.
    async fn delete_enclosure(&self, id: &str) -> Result<bool, DatabaseError>;
    async fn enclosure_exists(&self, id: &str) -> Result<bool, DatabaseError>;
    async fn list_enclosures(&self) -> Result<Vec<Enclosure>, DatabaseError>;

    // -- keepers ----------------------------------------------------------

    async fn save_keeper(&self, keeper: &ZooKeeper) -> Result<(), DatabaseError>;
    async fn find_keeper(&self, id: &str) -> Result<Option<ZooKeeper>, DatabaseError>;
    async fn update_keeper(&self, id: &str, update: KeeperUpdate) -> Result<ZooKeeper, DatabaseError>;
    /// Delete a keeper and every caretaker link pointing at them.
    async fn delete_keeper(&self, id: &str) -> Result<bool, DatabaseError>;
    async fn keeper_exists(&self, id: &str) -> Result<bool, DatabaseError>;
    async fn list_keepers(&self) -> Result<Vec<ZooKeeper>, DatabaseError>;
    async fn list_keepers_by_department(
        &self,
        department: Department,
    ) -> Result<Vec<ZooKeeper>, DatabaseError>;

    // -- availability -----------------------------------------------------

    /// Every animal with no enclosure, keyed by ID.
    async fn available_animals(&self) -> Result<BTreeMap<String, Animal>, DatabaseError>;
    /// Every keeper whose working status allows new assignments, keyed by ID.
    ///
    /// Keepers may serve several enclosures, so assignment does not remove
    /// them from this view.
    async fn available_keepers(&self) -> Result<BTreeMap<String, ZooKeeper>, DatabaseError>;
    async fn is_in_enclosure(&self, animal_id: &str, enclosure_id: &str) -> Result<bool, DatabaseError>;

    /// Bind an unassigned animal to an enclosure.
    ///
    /// Fails with `NotAvailable` if the animal already has an enclosure and
    /// with `NotFound` if either record is missing. Nothing is written on failure.
    async fn remove_available(&self, animal_id: &str, enclosure_id: &str) -> Result<(), DatabaseError>;

    /// Add an active keeper to an enclosure's caretakers.
    ///
    /// Fails with `NotAvailable` if the keeper is not active or already
    /// cares for the enclosure, and with `NotFound` if either record is missing.
    async fn assign_caretaker(&self, enclosure_id: &str, keeper_id: &str) -> Result<(), DatabaseError>;

    /// Return an animal to the unassigned pool.
    ///
    /// Returns the enclosure it left, or `None` if it was already unassigned.
    async fn release_animal(&self, animal_id: &str) -> Result<Option<String>, DatabaseError>;

    /// Drop a caretaker link. Returns whether one existed.
    async fn remove_caretaker(&self, enclosure_id: &str, keeper_id: &str) -> Result<bool, DatabaseError>;
}
