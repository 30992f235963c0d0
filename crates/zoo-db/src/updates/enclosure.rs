//! Enclosure update builder.

use serde::Serialize;
use zoo_core::entities::{Enclosure, validate_name};
use zoo_core::enums::{EnvironmentType, LocationType};
use zoo_core::errors::ZooError;

#[derive(Debug, Clone, Default, Serialize)]
pub struct EnclosureUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<EnvironmentType>,
}

impl EnclosureUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.area.is_none()
            && self.temperature.is_none()
            && self.location.is_none()
            && self.environment.is_none()
    }

    /// # Errors
    ///
    /// Returns `ZooError::Validation` for a blank name, bad area, or bad temperature.
    pub fn validate(mut self) -> Result<Self, ZooError> {
        if let Some(name) = self.name.take() {
            self.name = Some(validate_name("enclosure name", &name)?);
        }
        if let Some(area) = self.area {
            zoo_core::entities::validate_area(area)?;
        }
        if let Some(temperature) = self.temperature {
            zoo_core::entities::validate_temperature(temperature)?;
        }
        Ok(self)
    }

    pub fn apply_to(&self, enclosure: &mut Enclosure) {
        if let Some(name) = &self.name {
            enclosure.name.clone_from(name);
        }
        if let Some(area) = self.area {
            enclosure.area = area;
        }
        if let Some(temperature) = self.temperature {
            enclosure.temperature = temperature;
        }
        if let Some(location) = self.location {
            enclosure.location = location;
        }
        if let Some(environment) = self.environment {
            enclosure.environment = environment;
        }
    }
}

pub struct EnclosureUpdateBuilder(EnclosureUpdate);

impl EnclosureUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(EnclosureUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn area(mut self, area: f64) -> Self {
        self.0.area = Some(area);
        self
    }

    #[must_use]
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.0.temperature = Some(temperature);
        self
    }

    #[must_use]
    pub fn location(mut self, location: LocationType) -> Self {
        self.0.location = Some(location);
        self
    }

    #[must_use]
    pub fn environment(mut self, environment: EnvironmentType) -> Self {
        self.0.environment = Some(environment);
        self
    }

    #[must_use]
    pub fn build(self) -> EnclosureUpdate {
        self.0
    }
}

impl Default for EnclosureUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
