use zoo_core::errors::ZooError;
use zoo_core::ids::{EntityKind, format_id};

/// Database-backed issuer. Unique for the lifetime of the database file.
///
/// A failed attempt rolls back and leaves `last_number` untouched, so
/// failures never open a gap. A crash between update and commit is also
/// rolled back by `SQLite` on the next open.
#[derive(Clone)]
pub struct DurableIssuer {
    conn: libsql::Connection,
}

impl DurableIssuer {
    #[must_use]
    pub const fn new(conn: libsql::Connection) -> Self {
        Self { conn }
    }

    /// Issue the next ID for `kind`.
    ///
    /// # Errors
    ///
    /// `IdentityUnavailable` if the transaction cannot start, a statement
    /// fails, or commit fails; `IdentityCorruption` if the counter update
    /// touched no row or the stored value is negative.
    pub async fn issue(&self, kind: EntityKind) -> Result<String, ZooError> {
        let prefix = kind.prefix();
        let tx = self
            .conn
            .transaction_with_behavior(libsql::TransactionBehavior::Immediate)
            .await
            .map_err(|e| unavailable(prefix, &e))?;

        match advance(&tx, prefix).await {
            Ok(next) => {
                tx.commit().await.map_err(|e| unavailable(prefix, &e))?;
                let id = format_id(kind, next);
                tracing::debug!(%id, "issued durable identity");
                Ok(id)
            }
            Err(error) => {
                if let Err(rollback_error) = tx.rollback().await {
                    tracing::warn!(%rollback_error, prefix, "identity rollback failed");
                }
                tracing::warn!(%error, prefix, "identity issuance failed");
                Err(error)
            }
        }
    }

    /// Current `last_number` for `kind`, or 0 if nothing was issued yet.
    ///
    /// # Errors
    ///
    /// `IdentityUnavailable` if the read fails.
    pub async fn last_number(&self, kind: EntityKind) -> Result<u64, ZooError> {
        let prefix = kind.prefix();
        read_last_number(&self.conn, prefix)
            .await?
            .map_or(Ok(0), |n| to_u64(prefix, n))
    }
}

/// Read, bump, and write back the counter for `prefix` inside the open
/// transaction. Returns the new `last_number`.
async fn advance(conn: &libsql::Connection, prefix: &str) -> Result<u64, ZooError> {
    let current = match read_last_number(conn, prefix).await? {
        Some(n) => n,
        None => {
            conn.execute(
                "INSERT INTO identity_counters (prefix, last_number) VALUES (?1, 0)",
                [prefix],
            )
            .await
            .map_err(|e| unavailable(prefix, &e))?;
            0
        }
    };
    to_u64(prefix, current)?;
    let next = current
        .checked_add(1)
        .ok_or_else(|| ZooError::IdentityCorruption {
            prefix: prefix.to_string(),
            detail: format!("last_number {current} cannot advance further"),
        })?;

    let changed = conn
        .execute(
            "UPDATE identity_counters SET last_number = ?1 WHERE prefix = ?2 AND last_number = ?3",
            libsql::params![next, prefix, current],
        )
        .await
        .map_err(|e| unavailable(prefix, &e))?;
    if changed != 1 {
        return Err(ZooError::IdentityCorruption {
            prefix: prefix.to_string(),
            detail: format!("advancing last_number {current} -> {next} touched {changed} rows"),
        });
    }
    to_u64(prefix, next)
}

async fn read_last_number(conn: &libsql::Connection, prefix: &str) -> Result<Option<i64>, ZooError> {
    let mut rows = conn
        .query(
            "SELECT last_number FROM identity_counters WHERE prefix = ?1",
            [prefix],
        )
        .await
        .map_err(|e| unavailable(prefix, &e))?;
    match rows.next().await.map_err(|e| unavailable(prefix, &e))? {
        Some(row) => Ok(Some(row.get::<i64>(0).map_err(|e| unavailable(prefix, &e))?)),
        None => Ok(None),
    }
}

fn to_u64(prefix: &str, value: i64) -> Result<u64, ZooError> {
    u64::try_from(value).map_err(|_| ZooError::IdentityCorruption {
        prefix: prefix.to_string(),
        detail: format!("last_number is negative ({value})"),
    })
}

fn unavailable(prefix: &str, error: &libsql::Error) -> ZooError {
    ZooError::IdentityUnavailable {
        prefix: prefix.to_string(),
        reason: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::ZooDb;

    async fn test_db() -> ZooDb {
        ZooDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn first_issue_seeds_the_counter() {
        let db = test_db().await;
        let issuer = db.identity_issuer();

        assert_eq!(issuer.last_number(EntityKind::Enclosure).await.unwrap(), 0);
        assert_eq!(issuer.issue(EntityKind::Enclosure).await.unwrap(), "E-0001");
        assert_eq!(issuer.last_number(EntityKind::Enclosure).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn prefixes_count_independently() {
        let db = test_db().await;
        let issuer = db.identity_issuer();

        issuer.issue(EntityKind::Animal).await.unwrap();
        issuer.issue(EntityKind::Animal).await.unwrap();
        assert_eq!(issuer.issue(EntityKind::Visitor).await.unwrap(), "V-0001");
        assert_eq!(issuer.issue(EntityKind::Animal).await.unwrap(), "A-0003");
    }

    #[tokio::test]
    async fn sequential_issues_are_unique_and_contiguous() {
        let db = test_db().await;
        let issuer = db.identity_issuer();

        let mut ids = HashSet::new();
        for n in 1..=50u64 {
            let id = issuer.issue(EntityKind::Finance).await.unwrap();
            assert_eq!(id, format_id(EntityKind::Finance, n));
            assert!(ids.insert(id));
        }
    }

    #[tokio::test]
    async fn suffix_grows_past_four_digits() {
        let db = test_db().await;
        db.conn()
            .execute(
                "INSERT INTO identity_counters (prefix, last_number) VALUES ('K', 9999)",
                (),
            )
            .await
            .unwrap();

        let issuer = db.identity_issuer();
        assert_eq!(issuer.issue(EntityKind::ZooKeeper).await.unwrap(), "K-10000");
    }

    #[tokio::test]
    async fn ignored_update_is_corruption_and_rolls_back() {
        let db = test_db().await;
        let issuer = db.identity_issuer();
        assert_eq!(issuer.issue(EntityKind::Animal).await.unwrap(), "A-0001");

        // Simulate an out-of-band change: every counter update is silently dropped.
        db.conn()
            .execute(
                "CREATE TRIGGER freeze_counters BEFORE UPDATE ON identity_counters \
                 BEGIN SELECT RAISE(IGNORE); END",
                (),
            )
            .await
            .unwrap();

        let err = issuer.issue(EntityKind::Animal).await.unwrap_err();
        assert!(matches!(err, ZooError::IdentityCorruption { .. }), "{err}");
        assert!(!err.is_retryable());
        assert_eq!(issuer.last_number(EntityKind::Animal).await.unwrap(), 1);

        // A prefix seeded inside the failed transaction is rolled back too.
        let err = issuer.issue(EntityKind::Enclosure).await.unwrap_err();
        assert!(matches!(err, ZooError::IdentityCorruption { .. }));
        let mut rows = db
            .conn()
            .query("SELECT COUNT(*) FROM identity_counters WHERE prefix = 'E'", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 0);

        db.conn()
            .execute("DROP TRIGGER freeze_counters", ())
            .await
            .unwrap();
        assert_eq!(issuer.issue(EntityKind::Animal).await.unwrap(), "A-0002");
    }

    #[tokio::test]
    async fn exhausted_counter_is_corruption() {
        let db = test_db().await;
        db.conn()
            .execute(
                "INSERT INTO identity_counters (prefix, last_number) VALUES ('A', ?1)",
                [i64::MAX],
            )
            .await
            .unwrap();

        let issuer = db.identity_issuer();
        let err = issuer.issue(EntityKind::Animal).await.unwrap_err();
        assert!(matches!(err, ZooError::IdentityCorruption { .. }), "{err}");
        assert!(!err.is_retryable());
        assert_eq!(issuer.last_number(EntityKind::Animal).await.unwrap(), i64::MAX.unsigned_abs());
    }

    #[tokio::test]
    async fn missing_table_is_unavailable() {
        let db = test_db().await;
        db.conn()
            .execute("DROP TABLE identity_counters", ())
            .await
            .unwrap();

        let err = db.identity_issuer().issue(EntityKind::Animal).await.unwrap_err();
        assert!(matches!(err, ZooError::IdentityUnavailable { .. }), "{err}");
        assert!(err.is_retryable());
    }
}
