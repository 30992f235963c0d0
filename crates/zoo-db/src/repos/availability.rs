//! Availability view and the link mutations behind admission.
//!
//! `remove_available` and `assign_caretaker` check and write inside one
//! `BEGIN IMMEDIATE` transaction, so a competing writer cannot slip in between
//! the check and the write.

use std::collections::BTreeMap;

use chrono::Utc;
use zoo_core::entities::{Animal, ZooKeeper};
use zoo_core::enums::WorkingStatus;
use zoo_core::errors::ZooError;
use zoo_core::ids::EntityKind;

use super::animal::{self, collect_animals};
use super::keeper::{self, collect_keepers};
use super::{not_found, row_exists};
use crate::error::DatabaseError;
use crate::helpers::{finish, get_opt_string, parse_enum};
use crate::service::ZooService;

fn not_available(kind: EntityKind, id: &str, reason: String) -> DatabaseError {
    ZooError::NotAvailable {
        kind,
        id: id.to_string(),
        reason,
    }
    .into()
}

/// `None` if the animal does not exist, `Some(None)` if it is unassigned.
#[allow(clippy::option_option)]
async fn current_enclosure(
    conn: &libsql::Connection,
    animal_id: &str,
) -> Result<Option<Option<String>>, DatabaseError> {
    let mut rows = conn
        .query("SELECT enclosure_id FROM animals WHERE id = ?1", [animal_id])
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(get_opt_string(&row, 0)?)),
        None => Ok(None),
    }
}

impl ZooService {
    pub async fn available_animals(&self) -> Result<BTreeMap<String, Animal>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM animals WHERE enclosure_id IS NULL OR enclosure_id = '' ORDER BY id",
            animal::SELECT_COLS
        );
        let rows = self.db().conn().query(&sql, ()).await?;
        Ok(collect_animals(rows)
            .await?
            .into_iter()
            .map(|a| (a.id.clone(), a))
            .collect())
    }

    pub async fn available_keepers(&self) -> Result<BTreeMap<String, ZooKeeper>, DatabaseError> {
        let sql = format!("SELECT {} FROM zookeepers ORDER BY id", keeper::SELECT_COLS);
        let rows = self.db().conn().query(&sql, ()).await?;
        Ok(collect_keepers(rows)
            .await?
            .into_iter()
            .filter(ZooKeeper::is_available)
            .map(|k| (k.id.clone(), k))
            .collect())
    }

    pub async fn is_in_enclosure(
        &self,
        animal_id: &str,
        enclosure_id: &str,
    ) -> Result<bool, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT 1 FROM animals WHERE id = ?1 AND enclosure_id = ?2",
                [animal_id, enclosure_id],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }

    pub async fn remove_available(
        &self,
        animal_id: &str,
        enclosure_id: &str,
    ) -> Result<(), DatabaseError> {
        let tx = self.db().begin_immediate().await?;
        let result = async {
            if !row_exists(&tx, "SELECT 1 FROM enclosures WHERE id = ?1", enclosure_id).await? {
                return Err(not_found(EntityKind::Enclosure, enclosure_id));
            }
            match current_enclosure(&tx, animal_id).await? {
                None => return Err(not_found(EntityKind::Animal, animal_id)),
                Some(Some(current)) => {
                    return Err(not_available(
                        EntityKind::Animal,
                        animal_id,
                        format!("already housed in {current}"),
                    ));
                }
                Some(None) => {}
            }

            let changed = tx
                .execute(
                    "UPDATE animals SET enclosure_id = ?1
                     WHERE id = ?2 AND (enclosure_id IS NULL OR enclosure_id = '')",
                    [enclosure_id, animal_id],
                )
                .await?;
            if changed != 1 {
                return Err(not_available(
                    EntityKind::Animal,
                    animal_id,
                    "assignment changed concurrently".into(),
                ));
            }
            Ok::<_, DatabaseError>(())
        }
        .await;

        finish(tx, result).await?;
        tracing::info!(animal = animal_id, enclosure = enclosure_id, "animal admitted");
        Ok(())
    }

    pub async fn assign_caretaker(
        &self,
        enclosure_id: &str,
        keeper_id: &str,
    ) -> Result<(), DatabaseError> {
        let tx = self.db().begin_immediate().await?;
        let result = async {
            if !row_exists(&tx, "SELECT 1 FROM enclosures WHERE id = ?1", enclosure_id).await? {
                return Err(not_found(EntityKind::Enclosure, enclosure_id));
            }

            let mut rows = tx
                .query("SELECT working_status FROM zookeepers WHERE id = ?1", [keeper_id])
                .await?;
            let Some(row) = rows.next().await? else {
                return Err(not_found(EntityKind::ZooKeeper, keeper_id));
            };
            let status: WorkingStatus = parse_enum(&row.get::<String>(0)?)?;
            if !status.is_assignable() {
                return Err(not_available(
                    EntityKind::ZooKeeper,
                    keeper_id,
                    format!("working status is {status}"),
                ));
            }

            let changed = tx
                .execute(
                    "INSERT INTO enclosure_caretakers (enclosure_id, keeper_id, assigned_at)
                     VALUES (?1, ?2, ?3)
                     ON CONFLICT(enclosure_id, keeper_id) DO NOTHING",
                    libsql::params![enclosure_id, keeper_id, Utc::now().to_rfc3339()],
                )
                .await?;
            if changed == 0 {
                return Err(not_available(
                    EntityKind::ZooKeeper,
                    keeper_id,
                    format!("already cares for {enclosure_id}"),
                ));
            }
            Ok::<_, DatabaseError>(())
        }
        .await;

        finish(tx, result).await?;
        tracing::info!(keeper = keeper_id, enclosure = enclosure_id, "caretaker assigned");
        Ok(())
    }

    pub async fn release_animal(&self, animal_id: &str) -> Result<Option<String>, DatabaseError> {
        let tx = self.db().begin_immediate().await?;
        let result = async {
            let previous = current_enclosure(&tx, animal_id)
                .await?
                .ok_or_else(|| not_found(EntityKind::Animal, animal_id))?;
            if previous.is_some() {
                tx.execute("UPDATE animals SET enclosure_id = NULL WHERE id = ?1", [animal_id])
                    .await?;
            }
            Ok::<_, DatabaseError>(previous)
        }
        .await;

        let previous = finish(tx, result).await?;
        if let Some(enclosure) = &previous {
            tracing::info!(animal = animal_id, %enclosure, "animal released");
        }
        Ok(previous)
    }

    pub async fn remove_caretaker(
        &self,
        enclosure_id: &str,
        keeper_id: &str,
    ) -> Result<bool, DatabaseError> {
        let changed = self
            .db()
            .conn()
            .execute(
                "DELETE FROM enclosure_caretakers WHERE enclosure_id = ?1 AND keeper_id = ?2",
                [enclosure_id, keeper_id],
            )
            .await?;
        if changed > 0 {
            tracing::info!(keeper = keeper_id, enclosure = enclosure_id, "caretaker removed");
        }
        Ok(changed > 0)
    }
}
