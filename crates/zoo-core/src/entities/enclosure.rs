use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{EnvironmentType, LocationType};
use crate::errors::ZooError;

/// Coldest and hottest temperatures an enclosure may be set to, in °C.
pub const TEMPERATURE_RANGE: (f64, f64) = (-30.0, 50.0);

/// A place animals live in and keepers look after.
///
/// `inhabitants` mirrors every animal whose `enclosure_id` points here.
/// `caretakers` is many-to-many: a keeper may serve several enclosures.
/// Occupancy is not limited by `area`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Enclosure {
    pub id: String,
    pub name: String,
    /// Square metres.
    pub area: f64,
    /// Degrees Celsius.
    pub temperature: f64,
    pub location: LocationType,
    pub environment: EnvironmentType,
    pub inhabitants: BTreeSet<String>,
    pub caretakers: BTreeSet<String>,
    pub registered_at: DateTime<Utc>,
}

impl Enclosure {
    #[must_use]
    pub fn houses(&self, animal_id: &str) -> bool {
        self.inhabitants.contains(animal_id)
    }

    #[must_use]
    pub fn is_cared_for_by(&self, keeper_id: &str) -> bool {
        self.caretakers.contains(keeper_id)
    }
}

/// Fields supplied when registering an enclosure.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct NewEnclosure {
    pub name: String,
    pub area: f64,
    pub temperature: f64,
    pub location: LocationType,
    pub environment: EnvironmentType,
}

impl NewEnclosure {
    /// # Errors
    ///
    /// Returns `ZooError::Validation` for an empty name, a non-positive area,
    /// or a temperature outside [`TEMPERATURE_RANGE`].
    pub fn validate(mut self) -> Result<Self, ZooError> {
        self.name = super::validate_name("enclosure name", &self.name)?;
        validate_area(self.area)?;
        validate_temperature(self.temperature)?;
        Ok(self)
    }

    /// Build the stored entity. New enclosures start empty and unstaffed.
    #[must_use]
    pub fn into_enclosure(self, id: String, registered_at: DateTime<Utc>) -> Enclosure {
        Enclosure {
            id,
            name: self.name,
            area: self.area,
            temperature: self.temperature,
            location: self.location,
            environment: self.environment,
            inhabitants: BTreeSet::new(),
            caretakers: BTreeSet::new(),
            registered_at,
        }
    }
}

/// # Errors
///
/// Returns `ZooError::Validation` unless `area` is finite and positive.
pub fn validate_area(area: f64) -> Result<(), ZooError> {
    if !area.is_finite() || area <= 0.0 {
        return Err(ZooError::Validation(format!(
            "area must be a positive number of square metres, got {area}"
        )));
    }
    Ok(())
}

/// # Errors
///
/// Returns `ZooError::Validation` unless `temperature` lies in [`TEMPERATURE_RANGE`].
pub fn validate_temperature(temperature: f64) -> Result<(), ZooError> {
    let (min, max) = TEMPERATURE_RANGE;
    if !temperature.is_finite() || temperature < min || temperature > max {
        return Err(ZooError::Validation(format!(
            "temperature must be between {min} and {max} °C, got {temperature}"
        )));
    }
    Ok(())
}
