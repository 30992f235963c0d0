//! Closed enumerations for animals, enclosures, and zookeepers.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and store the same spelling in SQL (`as_str`).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Species
// ---------------------------------------------------------------------------

/// Closed set of species the zoo keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Lion,
    Tiger,
    Elephant,
    Giraffe,
    Zebra,
    Fox,
    Bear,
    Wolf,
    Penguin,
    Dolphin,
    Crocodile,
    Eagle,
}

impl Species {
    pub const ALL: [Self; 12] = [
        Self::Lion,
        Self::Tiger,
        Self::Elephant,
        Self::Giraffe,
        Self::Zebra,
        Self::Fox,
        Self::Bear,
        Self::Wolf,
        Self::Penguin,
        Self::Dolphin,
        Self::Crocodile,
        Self::Eagle,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lion => "lion",
            Self::Tiger => "tiger",
            Self::Elephant => "elephant",
            Self::Giraffe => "giraffe",
            Self::Zebra => "zebra",
            Self::Fox => "fox",
            Self::Bear => "bear",
            Self::Wolf => "wolf",
            Self::Penguin => "penguin",
            Self::Dolphin => "dolphin",
            Self::Crocodile => "crocodile",
            Self::Eagle => "eagle",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

/// Recorded gender of an animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

impl Gender {
    pub const ALL: [Self; 3] = [Self::Male, Self::Female, Self::Unknown];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// HealthStatus
// ---------------------------------------------------------------------------

/// Current health of an animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Sick,
    Injured,
    Recovering,
    Quarantined,
}

impl HealthStatus {
    pub const ALL: [Self; 5] = [
        Self::Healthy,
        Self::Sick,
        Self::Injured,
        Self::Recovering,
        Self::Quarantined,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Sick => "sick",
            Self::Injured => "injured",
            Self::Recovering => "recovering",
            Self::Quarantined => "quarantined",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// LocationType
// ---------------------------------------------------------------------------

/// Whether an enclosure is indoors or outdoors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    Indoor,
    Outdoor,
}

impl LocationType {
    pub const ALL: [Self; 2] = [Self::Indoor, Self::Outdoor];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Indoor => "indoor",
            Self::Outdoor => "outdoor",
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EnvironmentType
// ---------------------------------------------------------------------------

/// Terrain of an enclosure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentType {
    Land,
    Aquatic,
    Mixed,
}

impl EnvironmentType {
    pub const ALL: [Self; 3] = [Self::Land, Self::Aquatic, Self::Mixed];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Land => "land",
            Self::Aquatic => "aquatic",
            Self::Mixed => "mixed",
        }
    }
}

impl fmt::Display for EnvironmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Department
// ---------------------------------------------------------------------------

/// Department a zookeeper belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    Mammals,
    Birds,
    Reptiles,
    Aquatics,
    Veterinary,
}

impl Department {
    pub const ALL: [Self; 5] = [
        Self::Mammals,
        Self::Birds,
        Self::Reptiles,
        Self::Aquatics,
        Self::Veterinary,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mammals => "mammals",
            Self::Birds => "birds",
            Self::Reptiles => "reptiles",
            Self::Aquatics => "aquatics",
            Self::Veterinary => "veterinary",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Rank
// ---------------------------------------------------------------------------

/// Seniority of a zookeeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    Trainee,
    Keeper,
    Senior,
    Head,
}

impl Rank {
    pub const ALL: [Self; 4] = [Self::Trainee, Self::Keeper, Self::Senior, Self::Head];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trainee => "trainee",
            Self::Keeper => "keeper",
            Self::Senior => "senior",
            Self::Head => "head",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// WorkingStatus
// ---------------------------------------------------------------------------

/// Employment status of a zookeeper. Only `active` keepers are assignable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WorkingStatus {
    Active,
    OnLeave,
    Retired,
}

impl WorkingStatus {
    pub const ALL: [Self; 3] = [Self::Active, Self::OnLeave, Self::Retired];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::OnLeave => "on_leave",
            Self::Retired => "retired",
        }
    }
}

impl fmt::Display for WorkingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WorkingStatus {
    /// Whether a keeper in this status can take on enclosures.
    #[must_use]
    pub const fn is_assignable(self) -> bool {
        matches!(self, Self::Active)
    }
}
