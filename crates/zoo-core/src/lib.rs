//! # zoo-core
//!
//! Core types shared across the zoo records crates.
//!
//! - Entity structs for animals, enclosures, and zookeepers, plus the
//!   `New*` registration payloads that validate raw field values
//! - Closed enumerations (species, health, rank, ...) with their SQL spellings
//! - Entity kinds, identity prefixes, and the `<Prefix>-<number>` ID format
//! - The domain error taxonomy with machine-readable codes

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
