//! Service layer over the libSQL database.
//!
//! `ZooService` wraps `ZooDb`. All repo methods are implemented as
//! `impl ZooService` blocks under [`crate::repos`]; this file wires them into
//! the [`EntityStore`] contract.

use std::collections::BTreeMap;

use zoo_core::entities::{Animal, Enclosure, ZooKeeper};
use zoo_core::enums::{Department, Species};

use crate::ZooDb;
use crate::error::DatabaseError;
use crate::identity::IdentityIssuer;
use crate::store::EntityStore;
use crate::updates::animal::AnimalUpdate;
use crate::updates::enclosure::EnclosureUpdate;
use crate::updates::keeper::KeeperUpdate;

/// Durable store for animals, enclosures, and keepers.
///
/// Every mutation that touches more than one row runs in a single
/// `BEGIN IMMEDIATE` transaction and is rolled back as a whole on failure.
pub struct ZooService {
    db: ZooDb,
}

impl ZooService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = ZooDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create from an existing `ZooDb` (for testing).
    #[must_use]
    pub const fn from_db(db: ZooDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &ZooDb {
        &self.db
    }

    /// Durable issuer sharing this service's connection.
    #[must_use]
    pub fn identity_issuer(&self) -> IdentityIssuer {
        self.db.identity_issuer().into()
    }
}

impl EntityStore for ZooService {
    async fn save_animal(&self, animal: &Animal) -> Result<(), DatabaseError> {
        Self::save_animal(self, animal).await
    }

    async fn find_animal(&self, id: &str) -> Result<Option<Animal>, DatabaseError> {
        Self::find_animal(self, id).await
    }

    async fn update_animal(&self, id: &str, update: AnimalUpdate) -> Result<Animal, DatabaseError> {
        Self::update_animal(self, id, update).await
    }

    async fn delete_animal(&self, id: &str) -> Result<bool, DatabaseError> {
        Self::delete_animal(self, id).await
    }

    async fn animal_exists(&self, id: &str) -> Result<bool, DatabaseError> {
        Self::animal_exists(self, id).await
    }

    async fn list_animals(&self) -> Result<Vec<Animal>, DatabaseError> {
        Self::list_animals(self).await
    }

    async fn list_animals_by_species(&self, species: Species) -> Result<Vec<Animal>, DatabaseError> {
        Self::list_animals_by_species(self, species).await
    }

    async fn save_enclosure(&self, enclosure: &Enclosure) -> Result<(), DatabaseError> {
        Self::save_enclosure(self, enclosure).await
    }

    async fn find_enclosure(&self, id: &str) -> Result<Option<Enclosure>, DatabaseError> {
        Self::find_enclosure(self, id).await
    }

    async fn update_enclosure(
        &self,
        id: &str,
        update: EnclosureUpdate,
    ) -> Result<Enclosure, DatabaseError> {
        Self::update_enclosure(self, id, update).await
    }

    async fn delete_enclosure(&self, id: &str) -> Result<bool, DatabaseError> {
        Self::delete_enclosure(self, id).await
    }

    async fn enclosure_exists(&self, id: &str) -> Result<bool, DatabaseError> {
        Self::enclosure_exists(self, id).await
    }

    async fn list_enclosures(&self) -> Result<Vec<Enclosure>, DatabaseError> {
        Self::list_enclosures(self).await
    }

    async fn save_keeper(&self, keeper: &ZooKeeper) -> Result<(), DatabaseError> {
        Self::save_keeper(self, keeper).await
    }

    async fn find_keeper(&self, id: &str) -> Result<Option<ZooKeeper>, DatabaseError> {
        Self::find_keeper(self, id).await
    }

    async fn update_keeper(&self, id: &str, update: KeeperUpdate) -> Result<ZooKeeper, DatabaseError> {
        Self::update_keeper(self, id, update).await
    }

    async fn delete_keeper(&self, id: &str) -> Result<bool, DatabaseError> {
        Self::delete_keeper(self, id).await
    }

    async fn keeper_exists(&self, id: &str) -> Result<bool, DatabaseError> {
        Self::keeper_exists(self, id).await
    }

    async fn list_keepers(&self) -> Result<Vec<ZooKeeper>, DatabaseError> {
        Self::list_keepers(self).await
    }

    async fn list_keepers_by_department(
        &self,
        department: Department,
    ) -> Result<Vec<ZooKeeper>, DatabaseError> {
        Self::list_keepers_by_department(self, department).await
    }

    async fn available_animals(&self) -> Result<BTreeMap<String, Animal>, DatabaseError> {
        Self::available_animals(self).await
    }

    async fn available_keepers(&self) -> Result<BTreeMap<String, ZooKeeper>, DatabaseError> {
        Self::available_keepers(self).await
    }

    async fn is_in_enclosure(&self, animal_id: &str, enclosure_id: &str) -> Result<bool, DatabaseError> {
        Self::is_in_enclosure(self, animal_id, enclosure_id).await
    }

    async fn remove_available(&self, animal_id: &str, enclosure_id: &str) -> Result<(), DatabaseError> {
        Self::remove_available(self, animal_id, enclosure_id).await
    }

    async fn assign_caretaker(&self, enclosure_id: &str, keeper_id: &str) -> Result<(), DatabaseError> {
        Self::assign_caretaker(self, enclosure_id, keeper_id).await
    }

    async fn release_animal(&self, animal_id: &str) -> Result<Option<String>, DatabaseError> {
        Self::release_animal(self, animal_id).await
    }

    async fn remove_caretaker(&self, enclosure_id: &str, keeper_id: &str) -> Result<bool, DatabaseError> {
        Self::remove_caretaker(self, enclosure_id, keeper_id).await
    }
}
