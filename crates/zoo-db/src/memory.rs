//! In-memory [`EntityStore`] for the volatile backend and for tests.
//!
//! Both halves of every relation live in [`MemoryState`] and are updated
//! under one lock: an animal's `enclosure_id` together with the enclosure's
//! inhabitant set, and a keeper link together with the enclosure's
//! caretaker set.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use zoo_core::entities::{Animal, Enclosure, ZooKeeper};
use zoo_core::enums::{Department, Species};
use zoo_core::errors::ZooError;
use zoo_core::ids::EntityKind;

use crate::error::DatabaseError;
use crate::identity::{IdentityIssuer, VolatileIssuer};
use crate::store::EntityStore;
use crate::updates::animal::AnimalUpdate;
use crate::updates::enclosure::EnclosureUpdate;
use crate::updates::keeper::KeeperUpdate;

#[derive(Debug, Default)]
struct MemoryState {
    animals: BTreeMap<String, Animal>,
    enclosures: BTreeMap<String, Enclosure>,
    keepers: BTreeMap<String, ZooKeeper>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh volatile issuer to pair with this store.
    #[must_use]
    pub fn identity_issuer(&self) -> IdentityIssuer {
        VolatileIssuer::new().into()
    }

    // Mutations never leave the maps half-updated before the guard drops.
    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn not_found(kind: EntityKind, id: &str) -> DatabaseError {
    ZooError::NotFound {
        kind,
        id: id.to_string(),
    }
    .into()
}

fn not_available(kind: EntityKind, id: &str, reason: String) -> DatabaseError {
    ZooError::NotAvailable {
        kind,
        id: id.to_string(),
        reason,
    }
    .into()
}

fn duplicate(kind: EntityKind, id: &str) -> DatabaseError {
    ZooError::Validation(format!("{kind} {id} is already registered")).into()
}

impl EntityStore for MemoryStore {
    async fn save_animal(&self, animal: &Animal) -> Result<(), DatabaseError> {
        if !animal.is_available() {
            return Err(ZooError::Validation(format!(
                "animal {} must be saved unassigned; admit it to an enclosure afterwards",
                animal.id
            ))
            .into());
        }
        let mut state = self.lock();
        if state.animals.contains_key(&animal.id) {
            return Err(duplicate(EntityKind::Animal, &animal.id));
        }
        // Stored unassigned as `None`, as the libSQL store reads it back.
        let stored = Animal {
            enclosure_id: None,
            ..animal.clone()
        };
        state.animals.insert(animal.id.clone(), stored);
        Ok(())
    }

    async fn find_animal(&self, id: &str) -> Result<Option<Animal>, DatabaseError> {
        Ok(self.lock().animals.get(id).cloned())
    }

    async fn update_animal(&self, id: &str, update: AnimalUpdate) -> Result<Animal, DatabaseError> {
        let update = update.validate()?;
        let mut state = self.lock();
        let animal = state
            .animals
            .get_mut(id)
            .ok_or_else(|| not_found(EntityKind::Animal, id))?;
        update.apply_to(animal);
        Ok(animal.clone())
    }

    async fn delete_animal(&self, id: &str) -> Result<bool, DatabaseError> {
        let mut state = self.lock();
        let Some(animal) = state.animals.remove(id) else {
            return Ok(false);
        };
        if let Some(enclosure) = animal
            .enclosure_id
            .as_deref()
            .and_then(|eid| state.enclosures.get_mut(eid))
        {
            enclosure.inhabitants.remove(id);
        }
        Ok(true)
    }

    async fn animal_exists(&self, id: &str) -> Result<bool, DatabaseError> {
        Ok(self.lock().animals.contains_key(id))
    }

    async fn list_animals(&self) -> Result<Vec<Animal>, DatabaseError> {
        Ok(self.lock().animals.values().cloned().collect())
    }

    async fn list_animals_by_species(&self, species: Species) -> Result<Vec<Animal>, DatabaseError> {
        Ok(self
            .lock()
            .animals
            .values()
            .filter(|a| a.species == species)
            .cloned()
            .collect())
    }

    async fn save_enclosure(&self, enclosure: &Enclosure) -> Result<(), DatabaseError> {
        if !enclosure.inhabitants.is_empty() || !enclosure.caretakers.is_empty() {
            return Err(ZooError::Validation(format!(
                "enclosure {} must be saved without inhabitants or caretakers",
                enclosure.id
            ))
            .into());
        }
        let mut state = self.lock();
        if state.enclosures.contains_key(&enclosure.id) {
            return Err(duplicate(EntityKind::Enclosure, &enclosure.id));
        }
        state.enclosures.insert(enclosure.id.clone(), enclosure.clone());
        Ok(())
    }

    async fn find_enclosure(&self, id: &str) -> Result<Option<Enclosure>, DatabaseError> {
        Ok(self.lock().enclosures.get(id).cloned())
    }

    async fn update_enclosure(
        &self,
        id: &str,
        update: EnclosureUpdate,
    ) -> Result<Enclosure, DatabaseError> {
        let update = update.validate()?;
        let mut state = self.lock();
        let enclosure = state
            .enclosures
            .get_mut(id)
            .ok_or_else(|| not_found(EntityKind::Enclosure, id))?;
        update.apply_to(enclosure);
        Ok(enclosure.clone())
    }

    async fn delete_enclosure(&self, id: &str) -> Result<bool, DatabaseError> {
        let mut state = self.lock();
        let Some(enclosure) = state.enclosures.remove(id) else {
            return Ok(false);
        };
        for animal_id in &enclosure.inhabitants {
            if let Some(animal) = state.animals.get_mut(animal_id) {
                animal.enclosure_id = None;
            }
        }
        Ok(true)
    }

    async fn enclosure_exists(&self, id: &str) -> Result<bool, DatabaseError> {
        Ok(self.lock().enclosures.contains_key(id))
    }

    async fn list_enclosures(&self) -> Result<Vec<Enclosure>, DatabaseError> {
        Ok(self.lock().enclosures.values().cloned().collect())
    }

    async fn save_keeper(&self, keeper: &ZooKeeper) -> Result<(), DatabaseError> {
        let mut state = self.lock();
        if state.keepers.contains_key(&keeper.id) {
            return Err(duplicate(EntityKind::ZooKeeper, &keeper.id));
        }
        state.keepers.insert(keeper.id.clone(), keeper.clone());
        Ok(())
    }

    async fn find_keeper(&self, id: &str) -> Result<Option<ZooKeeper>, DatabaseError> {
        Ok(self.lock().keepers.get(id).cloned())
    }

    async fn update_keeper(&self, id: &str, update: KeeperUpdate) -> Result<ZooKeeper, DatabaseError> {
        let update = update.validate()?;
        let mut state = self.lock();
        let keeper = state
            .keepers
            .get_mut(id)
            .ok_or_else(|| not_found(EntityKind::ZooKeeper, id))?;
        update.apply_to(keeper);
        Ok(keeper.clone())
    }

    async fn delete_keeper(&self, id: &str) -> Result<bool, DatabaseError> {
        let mut state = self.lock();
        if state.keepers.remove(id).is_none() {
            return Ok(false);
        }
        for enclosure in state.enclosures.values_mut() {
            enclosure.caretakers.remove(id);
        }
        Ok(true)
    }

    async fn keeper_exists(&self, id: &str) -> Result<bool, DatabaseError> {
        Ok(self.lock().keepers.contains_key(id))
    }

    async fn list_keepers(&self) -> Result<Vec<ZooKeeper>, DatabaseError> {
        Ok(self.lock().keepers.values().cloned().collect())
    }

    async fn list_keepers_by_department(
        &self,
        department: Department,
    ) -> Result<Vec<ZooKeeper>, DatabaseError> {
        Ok(self
            .lock()
            .keepers
            .values()
            .filter(|k| k.department == department)
            .cloned()
            .collect())
    }

    async fn available_animals(&self) -> Result<BTreeMap<String, Animal>, DatabaseError> {
        Ok(self
            .lock()
            .animals
            .iter()
            .filter(|(_, a)| a.is_available())
            .map(|(id, a)| (id.clone(), a.clone()))
            .collect())
    }

    async fn available_keepers(&self) -> Result<BTreeMap<String, ZooKeeper>, DatabaseError> {
        Ok(self
            .lock()
            .keepers
            .iter()
            .filter(|(_, k)| k.is_available())
            .map(|(id, k)| (id.clone(), k.clone()))
            .collect())
    }

    async fn is_in_enclosure(&self, animal_id: &str, enclosure_id: &str) -> Result<bool, DatabaseError> {
        Ok(self
            .lock()
            .animals
            .get(animal_id)
            .is_some_and(|a| a.enclosure_id.as_deref() == Some(enclosure_id)))
    }

    async fn remove_available(&self, animal_id: &str, enclosure_id: &str) -> Result<(), DatabaseError> {
        let mut state = self.lock();
        let MemoryState {
            animals,
            enclosures,
            ..
        } = &mut *state;

        let enclosure = enclosures
            .get_mut(enclosure_id)
            .ok_or_else(|| not_found(EntityKind::Enclosure, enclosure_id))?;
        let animal = animals
            .get_mut(animal_id)
            .ok_or_else(|| not_found(EntityKind::Animal, animal_id))?;
        if !animal.is_available() {
            let current = animal.enclosure_id.as_deref().unwrap_or_default();
            return Err(not_available(
                EntityKind::Animal,
                animal_id,
                format!("already housed in {current}"),
            ));
        }

        animal.enclosure_id = Some(enclosure_id.to_string());
        enclosure.inhabitants.insert(animal_id.to_string());
        tracing::info!(animal = animal_id, enclosure = enclosure_id, "animal admitted");
        Ok(())
    }

    async fn assign_caretaker(&self, enclosure_id: &str, keeper_id: &str) -> Result<(), DatabaseError> {
        let mut state = self.lock();
        let MemoryState {
            enclosures,
            keepers,
            ..
        } = &mut *state;

        let enclosure = enclosures
            .get_mut(enclosure_id)
            .ok_or_else(|| not_found(EntityKind::Enclosure, enclosure_id))?;
        let keeper = keepers
            .get(keeper_id)
            .ok_or_else(|| not_found(EntityKind::ZooKeeper, keeper_id))?;
        if !keeper.is_available() {
            return Err(not_available(
                EntityKind::ZooKeeper,
                keeper_id,
                format!("working status is {}", keeper.working_status),
            ));
        }
        if !enclosure.caretakers.insert(keeper_id.to_string()) {
            return Err(not_available(
                EntityKind::ZooKeeper,
                keeper_id,
                format!("already cares for {enclosure_id}"),
            ));
        }
        tracing::info!(keeper = keeper_id, enclosure = enclosure_id, "caretaker assigned");
        Ok(())
    }

    async fn release_animal(&self, animal_id: &str) -> Result<Option<String>, DatabaseError> {
        let mut state = self.lock();
        let animal = state
            .animals
            .get_mut(animal_id)
            .ok_or_else(|| not_found(EntityKind::Animal, animal_id))?;
        let previous = animal.enclosure_id.take();
        if let Some(enclosure) = previous
            .as_deref()
            .and_then(|eid| state.enclosures.get_mut(eid))
        {
            enclosure.inhabitants.remove(animal_id);
        }
        Ok(previous)
    }

    async fn remove_caretaker(&self, enclosure_id: &str, keeper_id: &str) -> Result<bool, DatabaseError> {
        Ok(self
            .lock()
            .enclosures
            .get_mut(enclosure_id)
            .is_some_and(|e| e.caretakers.remove(keeper_id)))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use zoo_core::enums::WorkingStatus;

    use crate::test_support::helpers::{animal, enclosure, keeper};

    use super::*;

    #[tokio::test]
    async fn delete_animal_drops_inhabitant() {
        let store = MemoryStore::new();
        store.save_enclosure(&enclosure("E-0001")).await.unwrap();
        store.save_animal(&animal("A-0001", Species::Crocodile)).await.unwrap();
        store.remove_available("A-0001", "E-0001").await.unwrap();

        assert!(store.delete_animal("A-0001").await.unwrap());
        let pen = store.find_enclosure("E-0001").await.unwrap().unwrap();
        assert!(pen.inhabitants.is_empty());
    }

    #[tokio::test]
    async fn release_clears_both_sides() {
        let store = MemoryStore::new();
        store.save_enclosure(&enclosure("E-0001")).await.unwrap();
        store.save_animal(&animal("A-0001", Species::Dolphin)).await.unwrap();
        store.remove_available("A-0001", "E-0001").await.unwrap();

        assert_eq!(
            store.release_animal("A-0001").await.unwrap().as_deref(),
            Some("E-0001")
        );
        let pen = store.find_enclosure("E-0001").await.unwrap().unwrap();
        assert!(!pen.houses("A-0001"));
        assert!(store.find_animal("A-0001").await.unwrap().unwrap().is_available());
    }

    #[tokio::test]
    async fn retired_keeper_is_not_available() {
        let store = MemoryStore::new();
        store.save_enclosure(&enclosure("E-0001")).await.unwrap();
        store.save_keeper(&keeper("K-0001", WorkingStatus::Retired)).await.unwrap();

        let err = store.assign_caretaker("E-0001", "K-0001").await.unwrap_err();
        assert_eq!(err.code(), "not_available");
        assert!(store.available_keepers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn issuer_is_volatile() {
        let store = MemoryStore::new();
        let issuer = store.identity_issuer();
        assert!(!issuer.is_durable());
        assert_eq!(issuer.issue(EntityKind::Animal).await.unwrap(), "A-0001");
    }
}
