//! Animal repository: CRUD and species filter.

use zoo_core::entities::Animal;
use zoo_core::enums::Species;
use zoo_core::errors::ZooError;
use zoo_core::ids::EntityKind;

use super::{duplicate, not_found, row_exists};
use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, get_u8, parse_datetime, parse_enum};
use crate::service::ZooService;
use crate::updates::animal::AnimalUpdate;

pub(crate) const SELECT_COLS: &str =
    "id, name, species, age, gender, health, enclosure_id, registered_at";

pub(crate) fn row_to_animal(row: &libsql::Row) -> Result<Animal, DatabaseError> {
    Ok(Animal {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        species: parse_enum(&row.get::<String>(2)?)?,
        age: get_u8(row, 3)?,
        gender: parse_enum(&row.get::<String>(4)?)?,
        health: parse_enum(&row.get::<String>(5)?)?,
        enclosure_id: get_opt_string(row, 6)?,
        registered_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

pub(crate) async fn collect_animals(mut rows: libsql::Rows) -> Result<Vec<Animal>, DatabaseError> {
    let mut animals = Vec::new();
    while let Some(row) = rows.next().await? {
        animals.push(row_to_animal(&row)?);
    }
    Ok(animals)
}

impl ZooService {
    pub async fn save_animal(&self, animal: &Animal) -> Result<(), DatabaseError> {
        if !animal.is_available() {
            return Err(ZooError::Validation(format!(
                "animal {} must be saved unassigned; admit it to an enclosure afterwards",
                animal.id
            ))
            .into());
        }

        let changed = self
            .db()
            .conn()
            .execute(
                "INSERT INTO animals (id, name, species, age, gender, health, enclosure_id, registered_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, NULL, ?7)
                 ON CONFLICT(id) DO NOTHING",
                libsql::params![
                    animal.id.as_str(),
                    animal.name.as_str(),
                    animal.species.as_str(),
                    i64::from(animal.age),
                    animal.gender.as_str(),
                    animal.health.as_str(),
                    animal.registered_at.to_rfc3339()
                ],
            )
            .await?;
        if changed == 0 {
            return Err(duplicate(EntityKind::Animal, &animal.id));
        }
        tracing::debug!(id = %animal.id, "saved animal");
        Ok(())
    }

    pub async fn find_animal(&self, id: &str) -> Result<Option<Animal>, DatabaseError> {
        let sql = format!("SELECT {SELECT_COLS} FROM animals WHERE id = ?1");
        let mut rows = self.db().conn().query(&sql, [id]).await?;
        rows.next().await?.map(|row| row_to_animal(&row)).transpose()
    }

    pub async fn get_animal(&self, id: &str) -> Result<Animal, DatabaseError> {
        self.find_animal(id)
            .await?
            .ok_or_else(|| not_found(EntityKind::Animal, id))
    }

    pub async fn update_animal(
        &self,
        id: &str,
        update: AnimalUpdate,
    ) -> Result<Animal, DatabaseError> {
        let update = update.validate()?;

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1;

        if let Some(ref name) = update.name {
            sets.push(format!("name = ?{idx}"));
            params.push(name.as_str().into());
            idx += 1;
        }
        if let Some(age) = update.age {
            sets.push(format!("age = ?{idx}"));
            params.push(i64::from(age).into());
            idx += 1;
        }
        if let Some(gender) = update.gender {
            sets.push(format!("gender = ?{idx}"));
            params.push(gender.as_str().into());
            idx += 1;
        }
        if let Some(health) = update.health {
            sets.push(format!("health = ?{idx}"));
            params.push(health.as_str().into());
            idx += 1;
        }

        if sets.is_empty() {
            return self.get_animal(id).await;
        }

        params.push(id.into());
        let sql = format!("UPDATE animals SET {} WHERE id = ?{idx}", sets.join(", "));
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(not_found(EntityKind::Animal, id));
        }

        self.get_animal(id).await
    }

    /// The animal's row is the only stored half of its enclosure link, so
    /// deleting it also removes it from the inhabitant set.
    pub async fn delete_animal(&self, id: &str) -> Result<bool, DatabaseError> {
        let changed = self
            .db()
            .conn()
            .execute("DELETE FROM animals WHERE id = ?1", [id])
            .await?;
        if changed > 0 {
            tracing::info!(%id, "deleted animal");
        }
        Ok(changed > 0)
    }

    pub async fn animal_exists(&self, id: &str) -> Result<bool, DatabaseError> {
        row_exists(self.db().conn(), "SELECT 1 FROM animals WHERE id = ?1", id).await
    }

    pub async fn list_animals(&self) -> Result<Vec<Animal>, DatabaseError> {
        let sql = format!("SELECT {SELECT_COLS} FROM animals ORDER BY id");
        let rows = self.db().conn().query(&sql, ()).await?;
        collect_animals(rows).await
    }

    pub async fn list_animals_by_species(
        &self,
        species: Species,
    ) -> Result<Vec<Animal>, DatabaseError> {
        let sql = format!("SELECT {SELECT_COLS} FROM animals WHERE species = ?1 ORDER BY id");
        let rows = self.db().conn().query(&sql, [species.as_str()]).await?;
        collect_animals(rows).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use zoo_core::enums::HealthStatus;

    use crate::test_support::helpers::{animal, test_service};
    use crate::updates::animal::AnimalUpdateBuilder;

    use super::*;

    #[tokio::test]
    async fn save_and_find_animal() {
        let svc = test_service().await;
        let lion = animal("A-0001", Species::Lion);
        svc.save_animal(&lion).await.unwrap();

        let found = svc.find_animal("A-0001").await.unwrap().unwrap();
        assert_eq!(found.name, lion.name);
        assert_eq!(found.species, Species::Lion);
        assert!(found.is_available());
        assert!(svc.find_animal("A-0404").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let svc = test_service().await;
        svc.save_animal(&animal("A-0001", Species::Lion)).await.unwrap();

        let err = svc
            .save_animal(&animal("A-0001", Species::Tiger))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "validation");
    }

    #[tokio::test]
    async fn prelinked_animal_is_rejected() {
        let svc = test_service().await;
        let mut fox = animal("A-0001", Species::Fox);
        fox.enclosure_id = Some("E-0001".into());

        let err = svc.save_animal(&fox).await.unwrap_err();
        assert_eq!(err.code(), "validation");
        assert!(!svc.animal_exists("A-0001").await.unwrap());
    }

    #[tokio::test]
    async fn update_animal_fields() {
        let svc = test_service().await;
        svc.save_animal(&animal("A-0001", Species::Bear)).await.unwrap();

        let updated = svc
            .update_animal(
                "A-0001",
                AnimalUpdateBuilder::new()
                    .age(9)
                    .health(HealthStatus::Recovering)
                    .build(),
            )
            .await
            .unwrap();

        assert_eq!(updated.age, 9);
        assert_eq!(updated.health, HealthStatus::Recovering);
        assert_eq!(updated.species, Species::Bear);
    }

    #[tokio::test]
    async fn update_missing_animal_is_not_found() {
        let svc = test_service().await;
        let err = svc
            .update_animal("A-0042", AnimalUpdateBuilder::new().age(3).build())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "not_found");
    }

    #[tokio::test]
    async fn delete_animal() {
        let svc = test_service().await;
        svc.save_animal(&animal("A-0001", Species::Wolf)).await.unwrap();

        assert!(svc.delete_animal("A-0001").await.unwrap());
        assert!(!svc.delete_animal("A-0001").await.unwrap());
        assert!(!svc.animal_exists("A-0001").await.unwrap());
    }

    #[tokio::test]
    async fn list_by_species() {
        let svc = test_service().await;
        svc.save_animal(&animal("A-0001", Species::Penguin)).await.unwrap();
        svc.save_animal(&animal("A-0002", Species::Eagle)).await.unwrap();
        svc.save_animal(&animal("A-0003", Species::Penguin)).await.unwrap();

        assert_eq!(svc.list_animals().await.unwrap().len(), 3);
        let penguins: Vec<_> = svc
            .list_animals_by_species(Species::Penguin)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(penguins, vec!["A-0001".to_string(), "A-0003".to_string()]);
    }
}
