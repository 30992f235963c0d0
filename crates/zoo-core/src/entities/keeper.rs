use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Department, Rank, WorkingStatus};
use crate::errors::ZooError;

/// A member of staff who looks after enclosures.
///
/// Keepers do not own animals. Their link to enclosures is the enclosure's
/// caretaker set.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ZooKeeper {
    pub id: String,
    pub name: String,
    pub department: Department,
    pub rank: Rank,
    pub working_status: WorkingStatus,
    /// Cleared to handle dangerous animals.
    pub danger_handling: bool,
    pub licenses: Vec<String>,
    pub registered_at: DateTime<Utc>,
}

impl ZooKeeper {
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.working_status.is_assignable()
    }
}

/// Fields supplied when registering a keeper.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewKeeper {
    pub name: String,
    pub department: Department,
    pub rank: Rank,
    pub working_status: WorkingStatus,
    pub danger_handling: bool,
    pub licenses: Vec<String>,
}

impl NewKeeper {
    /// Normalize the name and license list.
    ///
    /// Licenses are trimmed, blanks dropped, duplicates removed.
    ///
    /// # Errors
    ///
    /// Returns `ZooError::Validation` for an empty name.
    pub fn validate(mut self) -> Result<Self, ZooError> {
        self.name = super::validate_name("keeper name", &self.name)?;
        self.licenses = normalize_licenses(self.licenses);
        Ok(self)
    }

    #[must_use]
    pub fn into_keeper(self, id: String, registered_at: DateTime<Utc>) -> ZooKeeper {
        ZooKeeper {
            id,
            name: self.name,
            department: self.department,
            rank: self.rank,
            working_status: self.working_status,
            danger_handling: self.danger_handling,
            licenses: self.licenses,
            registered_at,
        }
    }
}

#[must_use]
pub fn normalize_licenses(licenses: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(licenses.len());
    for license in licenses {
        let license = license.trim();
        if !license.is_empty() && !out.iter().any(|l| l == license) {
            out.push(license.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn licenses_are_normalized() {
        let keeper = NewKeeper {
            name: "Ada".into(),
            department: Department::Mammals,
            rank: Rank::Senior,
            working_status: WorkingStatus::Active,
            danger_handling: true,
            licenses: vec![" big-cats ".into(), String::new(), "big-cats".into(), "firearms".into()],
        }
        .validate()
        .unwrap();
        assert_eq!(keeper.licenses, vec!["big-cats".to_string(), "firearms".to_string()]);
    }

    #[test]
    fn retired_keeper_is_not_available() {
        let keeper = NewKeeper {
            name: "Bo".into(),
            department: Department::Birds,
            rank: Rank::Keeper,
            working_status: WorkingStatus::Retired,
            danger_handling: false,
            licenses: Vec::new(),
        }
        .into_keeper("K-0001".into(), Utc::now());
        assert!(!keeper.is_available());
    }
}
