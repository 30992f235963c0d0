//! Identity issuance for registered records.
//!
//! Two issuers share one contract, `issue(kind) -> "<Prefix>-<number>"`:
//!
//! - [`DurableIssuer`] keeps a `last_number` per prefix in the database and
//!   bumps it inside a `BEGIN IMMEDIATE` transaction, so concurrent
//!   processes serialize on the write lock and never hand out the same ID.
//! - [`VolatileIssuer`] keeps counters and used sets in process memory. All
//!   state is lost on restart, so it is only paired with the in-memory store.
//!
//! [`IdentityIssuer`] picks one at construction time; callers never branch
//! on which they hold.

mod durable;
mod volatile;

pub use durable::DurableIssuer;
pub use volatile::{IdentityState, VolatileIssuer};

use zoo_core::errors::ZooError;
use zoo_core::ids::EntityKind;

pub enum IdentityIssuer {
    Durable(DurableIssuer),
    Volatile(VolatileIssuer),
}

impl IdentityIssuer {
    /// Issue the next unused ID for `kind`.
    ///
    /// # Errors
    ///
    /// `IdentityUnavailable` when the store cannot be reached or locked,
    /// `IdentityCorruption` when the counter row was changed out of band.
    pub async fn issue(&self, kind: EntityKind) -> Result<String, ZooError> {
        match self {
            Self::Durable(issuer) => issuer.issue(kind).await,
            Self::Volatile(issuer) => issuer.issue(kind),
        }
    }

    #[must_use]
    pub const fn is_durable(&self) -> bool {
        matches!(self, Self::Durable(_))
    }
}

impl From<DurableIssuer> for IdentityIssuer {
    fn from(issuer: DurableIssuer) -> Self {
        Self::Durable(issuer)
    }
}

impl From<VolatileIssuer> for IdentityIssuer {
    fn from(issuer: VolatileIssuer) -> Self {
        Self::Volatile(issuer)
    }
}
