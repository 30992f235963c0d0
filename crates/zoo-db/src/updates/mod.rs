//! Partial-update builders for the stored entities.
//!
//! Updates only cover descriptive fields. Enclosure membership and caretaker
//! links change exclusively through the availability operations of
//! [`crate::store::EntityStore`].

pub mod animal;
pub mod enclosure;
pub mod keeper;
