//! # zoo-admission
//!
//! Binding unassigned animals and keepers to enclosures.
//!
//! An admission runs in two phases. The caller picks an enclosure and a
//! resource against a [`WorkingCopy`] of the availability view and the move
//! is simulated there first. Only then does the [`AdmissionCoordinator`]
//! call the authoritative store, which re-checks availability and fails
//! closed with `AdmissionConflict` if the snapshot went stale.
//!
//! - [`working_copy`]: isolated snapshots of the availability view
//! - [`selector`]: the [`Prompter`] seam and [`BoundedRetrySelector`]
//! - [`resource`]: what can be admitted ([`Admissible`])
//! - [`coordinator`]: the admission state machine

pub mod coordinator;
pub mod error;
pub mod resource;
pub mod selector;
pub mod working_copy;

pub use coordinator::{AdmissionAttempt, AdmissionCoordinator, AdmissionReport, AdmissionState, Preselection};
pub use error::AdmissionError;
pub use resource::Admissible;
pub use selector::{BoundedRetrySelector, DEFAULT_MAX_ATTEMPTS, Prompter, ScriptedPrompter, Selection, is_affirmative};
pub use working_copy::{WorkingCopy, WorkingCopyProvider};
