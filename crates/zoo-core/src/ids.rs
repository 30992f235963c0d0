//! Identity prefixes and the `<Prefix>-<number>` ID format.
//!
//! Every registered record gets an ID such as `A-0001`, `E-0013`, or
//! `K-0247`. The numeric suffix is zero-padded to four digits and simply
//! grows past that width (`A-12345`). IDs are used as primary keys, so the
//! format is part of the external contract.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::ZooError;

pub const PREFIX_ANIMAL: &str = "A";
pub const PREFIX_ENCLOSURE: &str = "E";
pub const PREFIX_KEEPER: &str = "K";
pub const PREFIX_VISITOR: &str = "V";
pub const PREFIX_FINANCE: &str = "F";

/// Minimum width of the numeric suffix.
pub const MIN_DIGITS: usize = 4;

/// Entity types that draw IDs from the identity namespace.
///
/// Registration flows pass their kind explicitly to the issuer; nothing
/// infers the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Animal,
    Enclosure,
    #[serde(alias = "keeper")]
    ZooKeeper,
    Visitor,
    Finance,
}

impl EntityKind {
    pub const ALL: [Self; 5] = [
        Self::Animal,
        Self::Enclosure,
        Self::ZooKeeper,
        Self::Visitor,
        Self::Finance,
    ];

    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Animal => PREFIX_ANIMAL,
            Self::Enclosure => PREFIX_ENCLOSURE,
            Self::ZooKeeper => PREFIX_KEEPER,
            Self::Visitor => PREFIX_VISITOR,
            Self::Finance => PREFIX_FINANCE,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Animal => "animal",
            Self::Enclosure => "enclosure",
            Self::ZooKeeper => "zoo_keeper",
            Self::Visitor => "visitor",
            Self::Finance => "finance",
        }
    }

    /// Look up the kind that owns a prefix.
    #[must_use]
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.prefix() == prefix)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = ZooError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "animal" | "a" => Ok(Self::Animal),
            "enclosure" | "e" => Ok(Self::Enclosure),
            "zoo_keeper" | "zookeeper" | "keeper" | "k" => Ok(Self::ZooKeeper),
            "visitor" | "v" => Ok(Self::Visitor),
            "finance" | "f" => Ok(Self::Finance),
            other => Err(ZooError::Validation(format!("unknown entity kind '{other}'"))),
        }
    }
}

/// Format an ID from a kind and its sequence number, e.g. `A-0001`.
#[must_use]
pub fn format_id(kind: EntityKind, number: u64) -> String {
    format!("{}-{number:0width$}", kind.prefix(), width = MIN_DIGITS)
}

/// Split an ID into its kind and sequence number.
///
/// Accepts exactly `^[A-Z]-\d{4,}$` with a known prefix.
///
/// # Errors
///
/// Returns `ZooError::Validation` if the string is not a well-formed ID.
pub fn parse_id(id: &str) -> Result<(EntityKind, u64), ZooError> {
    let malformed = || ZooError::Validation(format!("malformed identifier '{id}'"));

    let (prefix, digits) = id.split_once('-').ok_or_else(malformed)?;
    if prefix.len() != 1 || !prefix.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(malformed());
    }
    if digits.len() < MIN_DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    let kind = EntityKind::from_prefix(prefix).ok_or_else(malformed)?;
    let number = digits.parse::<u64>().map_err(|_| malformed())?;
    Ok((kind, number))
}

/// Check that `id` is well-formed and belongs to `kind`.
///
/// # Errors
///
/// Returns `ZooError::Validation` on a malformed ID or a prefix of another kind.
pub fn expect_kind(id: &str, kind: EntityKind) -> Result<u64, ZooError> {
    let (actual, number) = parse_id(id)?;
    if actual != kind {
        return Err(ZooError::Validation(format!(
            "identifier '{id}' belongs to {actual}, expected {kind}"
        )));
    }
    Ok(number)
}
