use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};

use zoo_core::errors::ZooError;
use zoo_core::ids::{EntityKind, format_id, parse_id};

#[derive(Debug)]
struct KindCounter {
    next: u64,
    used: HashSet<u64>,
}

impl Default for KindCounter {
    fn default() -> Self {
        Self {
            next: 1,
            used: HashSet::new(),
        }
    }
}

/// Per-kind counters and used sets for one process.
#[derive(Debug, Default)]
pub struct IdentityState {
    counters: HashMap<EntityKind, KindCounter>,
}

impl IdentityState {
    /// Take the first free number at or after the kind's cursor.
    fn next_for(&mut self, kind: EntityKind) -> u64 {
        let counter = self.counters.entry(kind).or_default();
        while counter.used.contains(&counter.next) {
            counter.next += 1;
        }
        let number = counter.next;
        counter.used.insert(number);
        counter.next = number + 1;
        number
    }

    fn mark(&mut self, kind: EntityKind, number: u64) -> bool {
        self.counters.entry(kind).or_default().used.insert(number)
    }

    fn issued(&self, kind: EntityKind) -> usize {
        self.counters.get(&kind).map_or(0, |c| c.used.len())
    }
}

/// In-process issuer backed by [`IdentityState`] behind a mutex.
///
/// Safe to share between threads. Nothing is persisted, so after a restart
/// it starts again at `0001`; never pair it with durable records of the
/// same kind.
#[derive(Debug, Default)]
pub struct VolatileIssuer {
    state: Mutex<IdentityState>,
}

impl VolatileIssuer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next unused ID for `kind`.
    ///
    /// # Errors
    ///
    /// Never fails today; the signature matches the durable issuer.
    pub fn issue(&self, kind: EntityKind) -> Result<String, ZooError> {
        let number = self.lock().next_for(kind);
        let id = format_id(kind, number);
        tracing::debug!(%id, "issued volatile identity");
        Ok(id)
    }

    /// Record an ID created elsewhere so it is never issued again.
    ///
    /// Returns `false` if the ID was already known.
    ///
    /// # Errors
    ///
    /// Returns `ZooError::Validation` for a malformed ID.
    pub fn mark_used(&self, id: &str) -> Result<bool, ZooError> {
        let (kind, number) = parse_id(id)?;
        Ok(self.lock().mark(kind, number))
    }

    /// How many IDs of `kind` are known to be taken.
    #[must_use]
    pub fn issued_count(&self, kind: EntityKind) -> usize {
        self.lock().issued(kind)
    }

    // Every mutation completes before the guard drops, so a poisoned
    // state is still consistent.
    fn lock(&self) -> std::sync::MutexGuard<'_, IdentityState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
