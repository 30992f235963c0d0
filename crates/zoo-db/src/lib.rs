//! # zoo-db
//!
//! libSQL persistence for the zoo records system.
//!
//! - [`ZooDb`]: database handle, pragmas, and embedded migrations
//! - [`identity`]: the durable (row-locked) and volatile (in-process) ID issuers
//! - [`store::EntityStore`]: the store contract, implemented by
//!   [`service::ZooService`] over libSQL and [`memory::MemoryStore`] in memory
//! - [`registration::Registrar`]: issue-then-persist registration flows
//!
//! Uses the `libsql` crate (C `SQLite` fork) with a single local connection.

pub mod error;
pub mod helpers;
pub mod identity;
pub mod memory;
mod migrations;
pub mod registration;
pub mod repos;
pub mod retry;
pub mod service;
pub mod store;
pub mod updates;

#[cfg(test)]
mod test_support;

use std::time::Duration;

use error::DatabaseError;
use identity::DurableIssuer;
use libsql::{Builder, TransactionBehavior};

/// How long a connection waits on another writer before giving up.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Central database handle for all zoo record state.
pub struct ZooDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl ZooDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let zoo_db = Self { db, conn };
        zoo_db.set_busy_timeout(DEFAULT_BUSY_TIMEOUT).await?;
        zoo_db.run_migrations().await?;
        Ok(zoo_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Set how long this connection waits for a competing writer.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the pragma fails.
    pub async fn set_busy_timeout(&self, timeout: Duration) -> Result<(), DatabaseError> {
        let millis = timeout.as_millis();
        // PRAGMA busy_timeout echoes the new value as a row.
        let mut rows = self
            .conn
            .query(&format!("PRAGMA busy_timeout = {millis}"), ())
            .await?;
        while rows.next().await?.is_some() {}
        Ok(())
    }

    /// Start a transaction that takes the database write lock up front.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the lock cannot be acquired within the busy timeout.
    pub async fn begin_immediate(&self) -> Result<libsql::Transaction, DatabaseError> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .await?)
    }

    /// Durable identity issuer sharing this handle's connection.
    #[must_use]
    pub fn identity_issuer(&self) -> DurableIssuer {
        DurableIssuer::new(self.conn.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> ZooDb {
        ZooDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let tables = [
            "identity_counters",
            "animals",
            "enclosures",
            "zookeepers",
            "enclosure_caretakers",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let db = test_db().await;
        let result = db
            .conn()
            .execute(
                "INSERT INTO animals (id, name, species, age, gender, health, enclosure_id) \
                 VALUES ('A-0001', 'Vixen', 'fox', 3, 'female', 'healthy', 'E-9999')",
                (),
            )
            .await;
        assert!(result.is_err(), "dangling enclosure reference should be rejected");
    }

    #[tokio::test]
    async fn age_check_constraint_holds() {
        let db = test_db().await;
        let result = db
            .conn()
            .execute(
                "INSERT INTO animals (id, name, species, age, gender, health) \
                 VALUES ('A-0001', 'Old', 'bear', 101, 'male', 'healthy')",
                (),
            )
            .await;
        assert!(result.is_err());
    }
}
