use std::io;

use thiserror::Error;
use zoo_core::errors::ZooError;
use zoo_db::error::DatabaseError;

use crate::coordinator::AdmissionState;

#[derive(Debug, Error)]
pub enum AdmissionError {
    #[error(transparent)]
    Domain(ZooError),

    #[error(transparent)]
    Store(DatabaseError),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] io::Error),

    #[error("Admission step out of order: expected {expected}, was {actual}")]
    OutOfOrder {
        expected: AdmissionState,
        actual: AdmissionState,
    },
}

impl From<ZooError> for AdmissionError {
    fn from(error: ZooError) -> Self {
        Self::Domain(error)
    }
}

// Domain failures surfaced by the store are admission outcomes, not storage faults.
impl From<DatabaseError> for AdmissionError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::Domain(domain) => Self::Domain(domain),
            other => Self::Store(other),
        }
    }
}

impl AdmissionError {
    #[must_use]
    pub const fn domain(&self) -> Option<&ZooError> {
        match self {
            Self::Domain(error) => Some(error),
            _ => None,
        }
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Domain(error) => error.code(),
            Self::Store(error) => error.code(),
            Self::Prompt(_) => "prompt",
            Self::OutOfOrder { .. } => "out_of_order",
        }
    }
}
