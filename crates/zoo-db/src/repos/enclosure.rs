//! Enclosure repository.
//!
//! Inhabitants are read back from `animals.enclosure_id` and caretakers from
//! `enclosure_caretakers`; neither set is stored on the enclosure row.

use std::collections::BTreeMap;

use zoo_core::entities::Enclosure;
use zoo_core::errors::ZooError;
use zoo_core::ids::EntityKind;

use super::{duplicate, not_found, row_exists};
use crate::error::DatabaseError;
use crate::helpers::{finish, parse_datetime, parse_enum};
use crate::service::ZooService;
use crate::updates::enclosure::EnclosureUpdate;

const SELECT_COLS: &str = "id, name, area, temperature, location, environment, registered_at";

fn row_to_enclosure(row: &libsql::Row) -> Result<Enclosure, DatabaseError> {
    Ok(Enclosure {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        area: row.get::<f64>(2)?,
        temperature: row.get::<f64>(3)?,
        location: parse_enum(&row.get::<String>(4)?)?,
        environment: parse_enum(&row.get::<String>(5)?)?,
        inhabitants: Default::default(),
        caretakers: Default::default(),
        registered_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

async fn load_links(conn: &libsql::Connection, enclosure: &mut Enclosure) -> Result<(), DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT id FROM animals WHERE enclosure_id = ?1",
            [enclosure.id.as_str()],
        )
        .await?;
    while let Some(row) = rows.next().await? {
        enclosure.inhabitants.insert(row.get::<String>(0)?);
    }

    let mut rows = conn
        .query(
            "SELECT keeper_id FROM enclosure_caretakers WHERE enclosure_id = ?1",
            [enclosure.id.as_str()],
        )
        .await?;
    while let Some(row) = rows.next().await? {
        enclosure.caretakers.insert(row.get::<String>(0)?);
    }
    Ok(())
}

impl ZooService {
    pub async fn save_enclosure(&self, enclosure: &Enclosure) -> Result<(), DatabaseError> {
        if !enclosure.inhabitants.is_empty() || !enclosure.caretakers.is_empty() {
            return Err(ZooError::Validation(format!(
                "enclosure {} must be saved without inhabitants or caretakers",
                enclosure.id
            ))
            .into());
        }

        let changed = self
            .db()
            .conn()
            .execute(
                "INSERT INTO enclosures (id, name, area, temperature, location, environment, registered_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT(id) DO NOTHING",
                libsql::params![
                    enclosure.id.as_str(),
                    enclosure.name.as_str(),
                    enclosure.area,
                    enclosure.temperature,
                    enclosure.location.as_str(),
                    enclosure.environment.as_str(),
                    enclosure.registered_at.to_rfc3339()
                ],
            )
            .await?;
        if changed == 0 {
            return Err(duplicate(EntityKind::Enclosure, &enclosure.id));
        }
        tracing::debug!(id = %enclosure.id, "saved enclosure");
        Ok(())
    }

    pub async fn find_enclosure(&self, id: &str) -> Result<Option<Enclosure>, DatabaseError> {
        let sql = format!("SELECT {SELECT_COLS} FROM enclosures WHERE id = ?1");
        let mut rows = self.db().conn().query(&sql, [id]).await?;
        let Some(row) = rows.next().await? else {
            return Ok(None);
        };
        let mut enclosure = row_to_enclosure(&row)?;
        load_links(self.db().conn(), &mut enclosure).await?;
        Ok(Some(enclosure))
    }

    pub async fn get_enclosure(&self, id: &str) -> Result<Enclosure, DatabaseError> {
        self.find_enclosure(id)
            .await?
            .ok_or_else(|| not_found(EntityKind::Enclosure, id))
    }

    pub async fn update_enclosure(
        &self,
        id: &str,
        update: EnclosureUpdate,
    ) -> Result<Enclosure, DatabaseError> {
        let update = update.validate()?;

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1;

        if let Some(ref name) = update.name {
            sets.push(format!("name = ?{idx}"));
            params.push(name.as_str().into());
            idx += 1;
        }
        if let Some(area) = update.area {
            sets.push(format!("area = ?{idx}"));
            params.push(area.into());
            idx += 1;
        }
        if let Some(temperature) = update.temperature {
            sets.push(format!("temperature = ?{idx}"));
            params.push(temperature.into());
            idx += 1;
        }
        if let Some(location) = update.location {
            sets.push(format!("location = ?{idx}"));
            params.push(location.as_str().into());
            idx += 1;
        }
        if let Some(environment) = update.environment {
            sets.push(format!("environment = ?{idx}"));
            params.push(environment.as_str().into());
            idx += 1;
        }

        if sets.is_empty() {
            return self.get_enclosure(id).await;
        }

        params.push(id.into());
        let sql = format!("UPDATE enclosures SET {} WHERE id = ?{idx}", sets.join(", "));
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(not_found(EntityKind::Enclosure, id));
        }

        self.get_enclosure(id).await
    }

    /// Releases every inhabitant back to the unassigned pool and drops all
    /// caretaker links before removing the enclosure, in one transaction.
    pub async fn delete_enclosure(&self, id: &str) -> Result<bool, DatabaseError> {
        let tx = self.db().begin_immediate().await?;
        let result = async {
            let released = tx
                .execute("UPDATE animals SET enclosure_id = NULL WHERE enclosure_id = ?1", [id])
                .await?;
            let unlinked = tx
                .execute("DELETE FROM enclosure_caretakers WHERE enclosure_id = ?1", [id])
                .await?;
            let deleted = tx
                .execute("DELETE FROM enclosures WHERE id = ?1", [id])
                .await?;
            Ok::<_, DatabaseError>((released, unlinked, deleted))
        }
        .await;

        let (released, unlinked, deleted) = finish(tx, result).await?;
        if deleted > 0 {
            tracing::info!(%id, released, unlinked, "deleted enclosure");
        }
        Ok(deleted > 0)
    }

    pub async fn enclosure_exists(&self, id: &str) -> Result<bool, DatabaseError> {
        row_exists(self.db().conn(), "SELECT 1 FROM enclosures WHERE id = ?1", id).await
    }

    pub async fn list_enclosures(&self) -> Result<Vec<Enclosure>, DatabaseError> {
        let sql = format!("SELECT {SELECT_COLS} FROM enclosures ORDER BY id");
        let mut rows = self.db().conn().query(&sql, ()).await?;
        let mut by_id = BTreeMap::new();
        while let Some(row) = rows.next().await? {
            let enclosure = row_to_enclosure(&row)?;
            by_id.insert(enclosure.id.clone(), enclosure);
        }

        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT enclosure_id, id FROM animals WHERE enclosure_id IS NOT NULL",
                (),
            )
            .await?;
        while let Some(row) = rows.next().await? {
            if let Some(enclosure) = by_id.get_mut(&row.get::<String>(0)?) {
                enclosure.inhabitants.insert(row.get::<String>(1)?);
            }
        }

        let mut rows = self
            .db()
            .conn()
            .query("SELECT enclosure_id, keeper_id FROM enclosure_caretakers", ())
            .await?;
        while let Some(row) = rows.next().await? {
            if let Some(enclosure) = by_id.get_mut(&row.get::<String>(0)?) {
                enclosure.caretakers.insert(row.get::<String>(1)?);
            }
        }

        Ok(by_id.into_values().collect())
    }
}
