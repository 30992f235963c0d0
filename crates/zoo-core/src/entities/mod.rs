//! Entity structs for animals, enclosures, and zookeepers.
//!
//! Each entity maps to a table in the libSQL database. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema`. The `New*` payloads carry
//! the fields a registration supplies before an ID exists.

mod animal;
mod enclosure;
mod keeper;

pub use animal::{Animal, MAX_AGE, NewAnimal, validate_age};
pub use enclosure::{Enclosure, NewEnclosure, TEMPERATURE_RANGE, validate_area, validate_temperature};
pub use keeper::{NewKeeper, ZooKeeper, normalize_licenses};

use crate::errors::ZooError;

/// Longest accepted name, in characters.
pub const MAX_NAME_LEN: usize = 64;

/// Trim and check a display name.
///
/// # Errors
///
/// Returns `ZooError::Validation` for an empty or overlong name.
pub fn validate_name(field: &str, name: &str) -> Result<String, ZooError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ZooError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(ZooError::Validation(format!(
            "{field} must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}
