//! Animal update builder.

use serde::Serialize;
use zoo_core::entities::Animal;
use zoo_core::entities::validate_name;
use zoo_core::enums::{Gender, HealthStatus};
use zoo_core::errors::ZooError;

#[derive(Debug, Clone, Default, Serialize)]
pub struct AnimalUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<HealthStatus>,
}

impl AnimalUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.gender.is_none() && self.health.is_none()
    }

    /// # Errors
    ///
    /// Returns `ZooError::Validation` for a blank name or out-of-range age.
    pub fn validate(mut self) -> Result<Self, ZooError> {
        if let Some(name) = self.name.take() {
            self.name = Some(validate_name("animal name", &name)?);
        }
        if let Some(age) = self.age {
            zoo_core::entities::validate_age(age)?;
        }
        Ok(self)
    }

    pub fn apply_to(&self, animal: &mut Animal) {
        if let Some(name) = &self.name {
            animal.name.clone_from(name);
        }
        if let Some(age) = self.age {
            animal.age = age;
        }
        if let Some(gender) = self.gender {
            animal.gender = gender;
        }
        if let Some(health) = self.health {
            animal.health = health;
        }
    }
}

pub struct AnimalUpdateBuilder(AnimalUpdate);

impl AnimalUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(AnimalUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn age(mut self, age: u8) -> Self {
        self.0.age = Some(age);
        self
    }

    #[must_use]
    pub fn gender(mut self, gender: Gender) -> Self {
        self.0.gender = Some(gender);
        self
    }

    #[must_use]
    pub fn health(mut self, health: HealthStatus) -> Self {
        self.0.health = Some(health);
        self
    }

    #[must_use]
    pub fn build(self) -> AnimalUpdate {
        self.0
    }
}

impl Default for AnimalUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
