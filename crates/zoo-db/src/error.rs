//! Database error types for zoo-db.

use thiserror::Error;
use zoo_core::errors::ZooError;

/// Errors from store and database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned data that could not be decoded.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// A domain rule rejected the operation.
    #[error(transparent)]
    Domain(#[from] ZooError),
}

impl DatabaseError {
    /// The domain error inside, if this is one.
    #[must_use]
    pub const fn domain(&self) -> Option<&ZooError> {
        match self {
            Self::Domain(err) => Some(err),
            _ => None,
        }
    }

    /// Machine-readable code; storage faults share `storage`.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Domain(err) => err.code(),
            _ => "storage",
        }
    }
}
