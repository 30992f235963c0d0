use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Gender, HealthStatus, Species};
use crate::errors::ZooError;

/// Oldest age the registry accepts.
pub const MAX_AGE: u8 = 100;

/// An animal in the collection.
///
/// `enclosure_id` is `None` while the animal sits in the unassigned pool.
/// When set, that enclosure's inhabitant set contains this animal's ID.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Animal {
    pub id: String,
    pub name: String,
    pub species: Species,
    pub age: u8,
    pub gender: Gender,
    pub health: HealthStatus,
    pub enclosure_id: Option<String>,
    pub registered_at: DateTime<Utc>,
}

impl Animal {
    /// An empty reference counts as unassigned, matching the stored form.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.enclosure_id.as_deref().is_none_or(str::is_empty)
    }
}

/// Fields supplied when registering an animal.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewAnimal {
    pub name: String,
    pub species: Species,
    pub age: u8,
    pub gender: Gender,
    pub health: HealthStatus,
}

impl NewAnimal {
    /// Check field ranges and normalize the name.
    ///
    /// # Errors
    ///
    /// Returns `ZooError::Validation` for an empty name or an age above [`MAX_AGE`].
    pub fn validate(mut self) -> Result<Self, ZooError> {
        self.name = super::validate_name("animal name", &self.name)?;
        validate_age(self.age)?;
        Ok(self)
    }

    /// Build the stored entity. New animals always start unassigned.
    #[must_use]
    pub fn into_animal(self, id: String, registered_at: DateTime<Utc>) -> Animal {
        Animal {
            id,
            name: self.name,
            species: self.species,
            age: self.age,
            gender: self.gender,
            health: self.health,
            enclosure_id: None,
            registered_at,
        }
    }
}

/// # Errors
///
/// Returns `ZooError::Validation` if `age` exceeds [`MAX_AGE`].
pub fn validate_age(age: u8) -> Result<(), ZooError> {
    if age > MAX_AGE {
        return Err(ZooError::Validation(format!(
            "age must be between 0 and {MAX_AGE}, got {age}"
        )));
    }
    Ok(())
}
