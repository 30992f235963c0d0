//! Behaviour every `EntityStore` backend must share.
//!
//! Each scenario is written once against the trait and run against both the
//! libSQL service and the in-memory store.

use chrono::Utc;
use pretty_assertions::assert_eq;
use rstest::rstest;
use zoo_core::entities::{Animal, Enclosure, NewAnimal, NewEnclosure, NewKeeper, ZooKeeper};
use zoo_core::enums::{
    Department, EnvironmentType, Gender, HealthStatus, LocationType, Rank, Species, WorkingStatus,
};
use zoo_db::memory::MemoryStore;
use zoo_db::service::ZooService;
use zoo_db::store::EntityStore;
use zoo_db::updates::animal::AnimalUpdateBuilder;
use zoo_db::updates::keeper::KeeperUpdateBuilder;

fn animal(id: &str, species: Species) -> Animal {
    NewAnimal {
        name: format!("{species}"),
        species,
        age: 6,
        gender: Gender::Male,
        health: HealthStatus::Healthy,
    }
    .into_animal(id.into(), Utc::now())
}

fn enclosure(id: &str) -> Enclosure {
    NewEnclosure {
        name: format!("Habitat {id}"),
        area: 850.0,
        temperature: 18.0,
        location: LocationType::Outdoor,
        environment: EnvironmentType::Land,
    }
    .into_enclosure(id.into(), Utc::now())
}

fn keeper(id: &str, status: WorkingStatus) -> ZooKeeper {
    NewKeeper {
        name: format!("Keeper {id}"),
        department: Department::Mammals,
        rank: Rank::Senior,
        working_status: status,
        danger_handling: true,
        licenses: Vec::new(),
    }
    .into_keeper(id.into(), Utc::now())
}

async fn seed<S: EntityStore>(store: &S) {
    store.save_enclosure(&enclosure("E-0001")).await.unwrap();
    store.save_enclosure(&enclosure("E-0002")).await.unwrap();
    store.save_animal(&animal("A-0001", Species::Lion)).await.unwrap();
    store.save_animal(&animal("A-0002", Species::Elephant)).await.unwrap();
    store.save_keeper(&keeper("K-0001", WorkingStatus::Active)).await.unwrap();
    store.save_keeper(&keeper("K-0002", WorkingStatus::OnLeave)).await.unwrap();
}

async fn memory() -> MemoryStore {
    let store = MemoryStore::new();
    seed(&store).await;
    store
}

async fn durable() -> ZooService {
    let svc = ZooService::new_local(":memory:").await.unwrap();
    seed(&svc).await;
    svc
}

async fn animal_is_housed_once<S: EntityStore>(store: &S) {
    store.remove_available("A-0001", "E-0001").await.unwrap();

    let err = store.remove_available("A-0001", "E-0002").await.unwrap_err();
    assert_eq!(err.code(), "not_available");

    let first = store.find_enclosure("E-0001").await.unwrap().unwrap();
    let second = store.find_enclosure("E-0002").await.unwrap().unwrap();
    assert!(first.houses("A-0001"));
    assert!(second.inhabitants.is_empty());
    assert_eq!(
        store.find_animal("A-0001").await.unwrap().unwrap().enclosure_id,
        Some("E-0001".to_string())
    );
}

async fn availability_mirrors_enclosure_links<S: EntityStore>(store: &S) {
    store.remove_available("A-0002", "E-0002").await.unwrap();

    let available = store.available_animals().await.unwrap();
    assert!(available.contains_key("A-0001"));
    assert!(!available.contains_key("A-0002"));
    for pen in store.list_enclosures().await.unwrap() {
        for id in &pen.inhabitants {
            assert!(!available.contains_key(id), "{id} is both housed and available");
            assert!(store.is_in_enclosure(id, &pen.id).await.unwrap());
        }
    }
}

async fn snapshots_are_independent<S: EntityStore>(store: &S) {
    let mut snapshot = store.available_animals().await.unwrap();
    snapshot.remove("A-0001");
    snapshot.clear();

    assert_eq!(store.available_animals().await.unwrap().len(), 2);
}

async fn deletes_clean_up_links<S: EntityStore>(store: &S) {
    store.remove_available("A-0001", "E-0001").await.unwrap();
    store.assign_caretaker("E-0001", "K-0001").await.unwrap();

    assert!(store.delete_animal("A-0001").await.unwrap());
    assert!(store.delete_keeper("K-0001").await.unwrap());

    let pen = store.find_enclosure("E-0001").await.unwrap().unwrap();
    assert!(pen.inhabitants.is_empty());
    assert!(pen.caretakers.is_empty());

    store.remove_available("A-0002", "E-0001").await.unwrap();
    assert!(store.delete_enclosure("E-0001").await.unwrap());
    assert!(store.available_animals().await.unwrap().contains_key("A-0002"));
}

async fn keepers_follow_working_status<S: EntityStore>(store: &S) {
    let keys: Vec<_> = store.available_keepers().await.unwrap().into_keys().collect();
    assert_eq!(keys, vec!["K-0001".to_string()]);

    store
        .update_keeper(
            "K-0002",
            KeeperUpdateBuilder::new()
                .working_status(WorkingStatus::Active)
                .build(),
        )
        .await
        .unwrap();
    store.assign_caretaker("E-0002", "K-0002").await.unwrap();
    assert_eq!(store.available_keepers().await.unwrap().len(), 2);
}

async fn updates_leave_links_alone<S: EntityStore>(store: &S) {
    store.remove_available("A-0001", "E-0001").await.unwrap();
    let updated = store
        .update_animal("A-0001", AnimalUpdateBuilder::new().name("Leo").build())
        .await
        .unwrap();

    assert_eq!(updated.name, "Leo");
    assert_eq!(updated.enclosure_id.as_deref(), Some("E-0001"));
}

macro_rules! contract_tests {
    ($($name:ident),* $(,)?) => {
        mod memory_store {
            use super::*;
            $(
                #[tokio::test]
                async fn $name() {
                    super::$name(&memory().await).await;
                }
            )*
        }

        mod libsql_store {
            use super::*;
            $(
                #[tokio::test]
                async fn $name() {
                    super::$name(&durable().await).await;
                }
            )*
        }
    };
}

contract_tests!(
    animal_is_housed_once,
    availability_mirrors_enclosure_links,
    snapshots_are_independent,
    deletes_clean_up_links,
    keepers_follow_working_status,
    updates_leave_links_alone,
);

async fn unset_reference_is_admissible<S: EntityStore>(store: &S, reference: Option<&str>) {
    let mut cub = animal("A-0003", Species::Lion);
    cub.enclosure_id = reference.map(str::to_string);
    store.save_animal(&cub).await.unwrap();

    assert!(store.available_animals().await.unwrap().contains_key("A-0003"));
    assert_eq!(store.find_animal("A-0003").await.unwrap().unwrap().enclosure_id, None);
    store.remove_available("A-0003", "E-0002").await.unwrap();
    assert!(store.is_in_enclosure("A-0003", "E-0002").await.unwrap());
}

#[rstest]
#[case::null(None)]
#[case::empty(Some(""))]
#[tokio::test]
async fn unset_reference_is_admissible_in_both_stores(#[case] reference: Option<&str>) {
    unset_reference_is_admissible(&memory().await, reference).await;
    unset_reference_is_admissible(&durable().await, reference).await;
}
