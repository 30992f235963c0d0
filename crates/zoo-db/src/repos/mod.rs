//! Repository modules implementing the SQL side of every store operation.
//!
//! Each module adds methods to `ZooService` via `impl ZooService` blocks.

pub mod animal;
pub mod availability;
pub mod enclosure;
pub mod keeper;

use zoo_core::errors::ZooError;
use zoo_core::ids::EntityKind;

use crate::error::DatabaseError;

/// Whether `sql` (a `SELECT 1 ... WHERE id = ?1`) returns a row for `id`.
pub(crate) async fn row_exists(
    conn: &libsql::Connection,
    sql: &str,
    id: &str,
) -> Result<bool, DatabaseError> {
    let mut rows = conn.query(sql, [id]).await?;
    Ok(rows.next().await?.is_some())
}

pub(crate) fn not_found(kind: EntityKind, id: &str) -> DatabaseError {
    ZooError::NotFound {
        kind,
        id: id.to_string(),
    }
    .into()
}

pub(crate) fn duplicate(kind: EntityKind, id: &str) -> DatabaseError {
    ZooError::Validation(format!("{kind} {id} is already registered")).into()
}
