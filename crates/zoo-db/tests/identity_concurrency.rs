//! Durable issuance across independent handles on one database file.

use std::collections::HashSet;
use std::time::Duration;

use tempfile::TempDir;
use zoo_core::errors::ZooError;
use zoo_core::ids::{EntityKind, format_id};
use zoo_db::ZooDb;
use zoo_db::retry::{RetryConfig, with_retry};

const WORKERS: usize = 6;
const PER_WORKER: usize = 15;

fn db_path(dir: &TempDir) -> String {
    dir.path().join("zoo.db").to_string_lossy().into_owned()
}

fn patient_retry() -> RetryConfig {
    RetryConfig {
        max_attempts: 10,
        base_delay: Duration::from_millis(10),
        max_delay: Duration::from_millis(200),
    }
}

#[test]
fn concurrent_handles_issue_unique_contiguous_ids() {
    let dir = TempDir::new().unwrap();
    let path = db_path(&dir);

    // Create the schema once before the workers race.
    tokio::runtime::Runtime::new()
        .unwrap()
        .block_on(ZooDb::open_local(&path))
        .unwrap();

    let workers: Vec<_> = (0..WORKERS)
        .map(|_| {
            let path = path.clone();
            std::thread::spawn(move || {
                let rt = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .unwrap();
                rt.block_on(async move {
                    let db = ZooDb::open_local(&path).await.unwrap();
                    let issuer = db.identity_issuer();
                    let mut ids = Vec::with_capacity(PER_WORKER);
                    for _ in 0..PER_WORKER {
                        let id = with_retry(&patient_retry(), "issue", || {
                            issuer.issue(EntityKind::Animal)
                        })
                        .await
                        .unwrap();
                        ids.push(id);
                    }
                    ids
                })
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for worker in workers {
        for id in worker.join().unwrap() {
            assert!(seen.insert(id.clone()), "duplicate identifier {id}");
        }
    }

    let total = WORKERS * PER_WORKER;
    let expected: HashSet<String> = (1..=total as u64)
        .map(|n| format_id(EntityKind::Animal, n))
        .collect();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn held_write_lock_reports_unavailable_and_leaves_counter() {
    let dir = TempDir::new().unwrap();
    let path = db_path(&dir);

    let holder = ZooDb::open_local(&path).await.unwrap();
    let waiter = ZooDb::open_local(&path).await.unwrap();
    waiter
        .set_busy_timeout(Duration::from_millis(50))
        .await
        .unwrap();

    let issuer = waiter.identity_issuer();
    assert_eq!(issuer.issue(EntityKind::Enclosure).await.unwrap(), "E-0001");

    let tx = holder.begin_immediate().await.unwrap();
    let err = issuer.issue(EntityKind::Enclosure).await.unwrap_err();
    assert!(
        matches!(err, ZooError::IdentityUnavailable { ref prefix, .. } if prefix == "E"),
        "unexpected error: {err:?}"
    );
    assert!(err.is_retryable());
    tx.rollback().await.unwrap();

    assert_eq!(issuer.last_number(EntityKind::Enclosure).await.unwrap(), 1);
    assert_eq!(issuer.issue(EntityKind::Enclosure).await.unwrap(), "E-0002");
}

#[tokio::test]
async fn counters_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = db_path(&dir);

    {
        let db = ZooDb::open_local(&path).await.unwrap();
        let issuer = db.identity_issuer();
        issuer.issue(EntityKind::ZooKeeper).await.unwrap();
        issuer.issue(EntityKind::ZooKeeper).await.unwrap();
    }

    let db = ZooDb::open_local(&path).await.unwrap();
    assert_eq!(
        db.identity_issuer().issue(EntityKind::ZooKeeper).await.unwrap(),
        "K-0003"
    );
}
