//! Shared test utilities for zoo-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use chrono::Utc;
    use zoo_core::entities::{Animal, Enclosure, NewAnimal, NewEnclosure, NewKeeper, ZooKeeper};
    use zoo_core::enums::{
        Department, EnvironmentType, Gender, HealthStatus, LocationType, Rank, Species,
        WorkingStatus,
    };

    use crate::ZooDb;
    use crate::service::ZooService;

    /// Create an in-memory `ZooService`.
    pub async fn test_service() -> ZooService {
        let db = ZooDb::open_local(":memory:").await.unwrap();
        ZooService::from_db(db)
    }

    pub fn animal(id: &str, species: Species) -> Animal {
        NewAnimal {
            name: format!("{species} {id}"),
            species,
            age: 4,
            gender: Gender::Female,
            health: HealthStatus::Healthy,
        }
        .into_animal(id.to_string(), Utc::now())
    }

    pub fn enclosure(id: &str) -> Enclosure {
        NewEnclosure {
            name: format!("Paddock {id}"),
            area: 1200.0,
            temperature: 21.5,
            location: LocationType::Outdoor,
            environment: EnvironmentType::Land,
        }
        .into_enclosure(id.to_string(), Utc::now())
    }

    pub fn keeper(id: &str, status: WorkingStatus) -> ZooKeeper {
        NewKeeper {
            name: format!("Keeper {id}"),
            department: Department::Mammals,
            rank: Rank::Keeper,
            working_status: status,
            danger_handling: false,
            licenses: vec!["first-aid".into()],
        }
        .into_keeper(id.to_string(), Utc::now())
    }
}
