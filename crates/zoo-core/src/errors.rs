//! Domain error taxonomy for the zoo records system.
//!
//! Every variant carries two renderings: `Display` is the system message and
//! may name raw identifiers for diagnostics, while [`ZooError::user_message`]
//! is safe to show at the console. [`ZooError::code`] is the stable,
//! machine-readable tag. Storage- and config-level errors live in their own
//! crates and wrap this type.

use thiserror::Error;

use crate::ids::EntityKind;

/// Where an interactive admission attempt gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStage {
    Container,
    Resource,
}

impl SelectionStage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Resource => "resource",
        }
    }
}

impl std::fmt::Display for SelectionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ZooError {
    /// The identity store could not be reached or a transient lock failed.
    #[error("Identity issuance unavailable for prefix {prefix}: {reason}")]
    IdentityUnavailable { prefix: String, reason: String },

    /// The identity counters were changed out of band.
    #[error("Identity counter corrupted for prefix {prefix}: {detail}")]
    IdentityCorruption { prefix: String, detail: String },

    /// The targeted animal or keeper is already bound.
    #[error("{kind} {id} is not available: {reason}")]
    NotAvailable {
        kind: EntityKind,
        id: String,
        reason: String,
    },

    /// The authoritative store diverged from the working copy before commit.
    #[error("Admission conflict committing {resource_id} into {enclosure_id}: {reason}")]
    AdmissionConflict {
        resource_id: String,
        enclosure_id: String,
        reason: String,
    },

    /// The interactive selector ran out of attempts.
    #[error("Selection aborted at {stage} stage after {attempts} attempts")]
    SelectionAborted {
        stage: SelectionStage,
        attempts: u32,
    },

    /// The chosen resource was missing from the working copy.
    #[error("Simulation failed: {resource_id} is no longer in the working copy")]
    SimulationFailed { resource_id: String },

    /// Entity lookup returned no result.
    #[error("Entity not found: {kind} {id}")]
    NotFound { kind: EntityKind, id: String },

    /// Data failed validation (field range, format, duplicate key).
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ZooError {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::IdentityUnavailable { .. } => "identity_unavailable",
            Self::IdentityCorruption { .. } => "identity_corruption",
            Self::NotAvailable { .. } => "not_available",
            Self::AdmissionConflict { .. } => "admission_conflict",
            Self::SelectionAborted { .. } => "selection_aborted",
            Self::SimulationFailed { .. } => "simulation_failed",
            Self::NotFound { .. } => "not_found",
            Self::Validation(_) => "validation",
        }
    }

    /// Console-safe message. Never includes identifiers or internal detail.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::IdentityUnavailable { .. } => {
                "Could not generate a new record number right now. Please try again.".to_string()
            }
            Self::IdentityCorruption { .. } => {
                "Record numbering is inconsistent. Contact an administrator before registering more records."
                    .to_string()
            }
            Self::NotAvailable { kind, .. } => {
                format!("That {} is not available for assignment.", kind_label(*kind))
            }
            Self::AdmissionConflict { .. } => {
                "The records changed while you were deciding. Start the assignment again.".to_string()
            }
            Self::SelectionAborted { stage, .. } => match stage {
                SelectionStage::Container => "No enclosure selected. Assignment cancelled.".to_string(),
                SelectionStage::Resource => "Nothing selected. Assignment cancelled.".to_string(),
            },
            Self::SimulationFailed { .. } => {
                "The selection is no longer available. Assignment cancelled.".to_string()
            }
            Self::NotFound { kind, .. } => format!("No such {}.", kind_label(*kind)),
            Self::Validation(_) => "The input is not valid.".to_string(),
        }
    }

    /// Transient failures a higher layer may retry.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::IdentityUnavailable { .. })
    }

    /// Outcomes that are part of normal operation rather than system faults.
    #[must_use]
    pub const fn is_expected(&self) -> bool {
        !matches!(
            self,
            Self::IdentityUnavailable { .. } | Self::IdentityCorruption { .. }
        )
    }
}

const fn kind_label(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Animal => "animal",
        EntityKind::Enclosure => "enclosure",
        EntityKind::ZooKeeper => "zookeeper",
        EntityKind::Visitor => "visitor",
        EntityKind::Finance => "finance record",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_hides_identifiers() {
        let err = ZooError::AdmissionConflict {
            resource_id: "A-0001".into(),
            enclosure_id: "E-0002".into(),
            reason: "already in E-0003".into(),
        };
        assert!(err.to_string().contains("A-0001"));
        assert!(!err.user_message().contains("A-0001"));
        assert!(!err.user_message().contains("E-000"));
        assert_eq!(err.code(), "admission_conflict");
    }

    #[test]
    fn only_unavailable_is_retryable() {
        let unavailable = ZooError::IdentityUnavailable {
            prefix: "A".into(),
            reason: "database is locked".into(),
        };
        let corruption = ZooError::IdentityCorruption {
            prefix: "A".into(),
            detail: "update touched 0 rows".into(),
        };
        assert!(unavailable.is_retryable());
        assert!(!corruption.is_retryable());
        assert!(!corruption.is_expected());
        assert!(!unavailable.is_expected());
    }

    #[test]
    fn aborted_selection_is_expected() {
        let err = ZooError::SelectionAborted {
            stage: SelectionStage::Resource,
            attempts: 3,
        };
        assert!(err.is_expected());
        assert_eq!(err.code(), "selection_aborted");
        assert_eq!(err.to_string(), "Selection aborted at resource stage after 3 attempts");
    }

    #[test]
    fn not_available_names_the_kind_only() {
        let err = ZooError::NotAvailable {
            kind: EntityKind::Animal,
            id: "A-0007".into(),
            reason: "assigned to E-0001".into(),
        };
        assert_eq!(err.user_message(), "That animal is not available for assignment.");
    }
}
