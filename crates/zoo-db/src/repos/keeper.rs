//! Zookeeper repository: CRUD and department filter.

use zoo_core::entities::ZooKeeper;
use zoo_core::enums::Department;
use zoo_core::ids::EntityKind;

use super::{duplicate, not_found, row_exists};
use crate::error::DatabaseError;
use crate::helpers::{encode_string_list, finish, parse_datetime, parse_enum, parse_string_list};
use crate::service::ZooService;
use crate::updates::keeper::KeeperUpdate;

pub(crate) const SELECT_COLS: &str =
    "id, name, department, keeper_rank, working_status, danger_handling, licenses, registered_at";

pub(crate) fn row_to_keeper(row: &libsql::Row) -> Result<ZooKeeper, DatabaseError> {
    Ok(ZooKeeper {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        department: parse_enum(&row.get::<String>(2)?)?,
        rank: parse_enum(&row.get::<String>(3)?)?,
        working_status: parse_enum(&row.get::<String>(4)?)?,
        danger_handling: row.get::<i64>(5)? != 0,
        licenses: parse_string_list(&row.get::<String>(6)?)?,
        registered_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

pub(crate) async fn collect_keepers(mut rows: libsql::Rows) -> Result<Vec<ZooKeeper>, DatabaseError> {
    let mut keepers = Vec::new();
    while let Some(row) = rows.next().await? {
        keepers.push(row_to_keeper(&row)?);
    }
    Ok(keepers)
}

impl ZooService {
    pub async fn save_keeper(&self, keeper: &ZooKeeper) -> Result<(), DatabaseError> {
        let licenses = encode_string_list(&keeper.licenses)?;
        let changed = self
            .db()
            .conn()
            .execute(
                "INSERT INTO zookeepers (id, name, department, keeper_rank, working_status, danger_handling, licenses, registered_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 ON CONFLICT(id) DO NOTHING",
                libsql::params![
                    keeper.id.as_str(),
                    keeper.name.as_str(),
                    keeper.department.as_str(),
                    keeper.rank.as_str(),
                    keeper.working_status.as_str(),
                    i64::from(keeper.danger_handling),
                    licenses,
                    keeper.registered_at.to_rfc3339()
                ],
            )
            .await?;
        if changed == 0 {
            return Err(duplicate(EntityKind::ZooKeeper, &keeper.id));
        }
        tracing::debug!(id = %keeper.id, "saved keeper");
        Ok(())
    }

    pub async fn find_keeper(&self, id: &str) -> Result<Option<ZooKeeper>, DatabaseError> {
        let sql = format!("SELECT {SELECT_COLS} FROM zookeepers WHERE id = ?1");
        let mut rows = self.db().conn().query(&sql, [id]).await?;
        rows.next().await?.map(|row| row_to_keeper(&row)).transpose()
    }

    pub async fn get_keeper(&self, id: &str) -> Result<ZooKeeper, DatabaseError> {
        self.find_keeper(id)
            .await?
            .ok_or_else(|| not_found(EntityKind::ZooKeeper, id))
    }

    pub async fn update_keeper(
        &self,
        id: &str,
        update: KeeperUpdate,
    ) -> Result<ZooKeeper, DatabaseError> {
        let update = update.validate()?;

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1;

        if let Some(ref name) = update.name {
            sets.push(format!("name = ?{idx}"));
            params.push(name.as_str().into());
            idx += 1;
        }
        if let Some(department) = update.department {
            sets.push(format!("department = ?{idx}"));
            params.push(department.as_str().into());
            idx += 1;
        }
        if let Some(rank) = update.rank {
            sets.push(format!("keeper_rank = ?{idx}"));
            params.push(rank.as_str().into());
            idx += 1;
        }
        if let Some(status) = update.working_status {
            sets.push(format!("working_status = ?{idx}"));
            params.push(status.as_str().into());
            idx += 1;
        }
        if let Some(allowed) = update.danger_handling {
            sets.push(format!("danger_handling = ?{idx}"));
            params.push(i64::from(allowed).into());
            idx += 1;
        }
        if let Some(ref licenses) = update.licenses {
            sets.push(format!("licenses = ?{idx}"));
            params.push(encode_string_list(licenses)?.into());
            idx += 1;
        }

        if sets.is_empty() {
            return self.get_keeper(id).await;
        }

        params.push(id.into());
        let sql = format!("UPDATE zookeepers SET {} WHERE id = ?{idx}", sets.join(", "));
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(not_found(EntityKind::ZooKeeper, id));
        }

        self.get_keeper(id).await
    }

    /// Drops every caretaker link for the keeper, then the keeper, in one transaction.
    pub async fn delete_keeper(&self, id: &str) -> Result<bool, DatabaseError> {
        let tx = self.db().begin_immediate().await?;
        let result = async {
            let unlinked = tx
                .execute("DELETE FROM enclosure_caretakers WHERE keeper_id = ?1", [id])
                .await?;
            let deleted = tx
                .execute("DELETE FROM zookeepers WHERE id = ?1", [id])
                .await?;
            Ok::<_, DatabaseError>((unlinked, deleted))
        }
        .await;

        let (unlinked, deleted) = finish(tx, result).await?;
        if deleted > 0 {
            tracing::info!(%id, unlinked, "deleted keeper");
        }
        Ok(deleted > 0)
    }

    pub async fn keeper_exists(&self, id: &str) -> Result<bool, DatabaseError> {
        row_exists(self.db().conn(), "SELECT 1 FROM zookeepers WHERE id = ?1", id).await
    }

    pub async fn list_keepers(&self) -> Result<Vec<ZooKeeper>, DatabaseError> {
        let sql = format!("SELECT {SELECT_COLS} FROM zookeepers ORDER BY id");
        let rows = self.db().conn().query(&sql, ()).await?;
        collect_keepers(rows).await
    }

    pub async fn list_keepers_by_department(
        &self,
        department: Department,
    ) -> Result<Vec<ZooKeeper>, DatabaseError> {
        let sql = format!("SELECT {SELECT_COLS} FROM zookeepers WHERE department = ?1 ORDER BY id");
        let rows = self.db().conn().query(&sql, [department.as_str()]).await?;
        collect_keepers(rows).await
    }
}
