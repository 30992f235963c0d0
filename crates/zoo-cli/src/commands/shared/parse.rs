use serde::de::DeserializeOwned;
use zoo_core::errors::ZooError;

/// Parse a `snake_case` enum value through its serde spelling.
///
/// Hyphens are accepted in place of underscores (`on-leave`). A bad value
/// is a validation refusal, not a fault.
pub fn parse_enum<T>(raw: &str, field: &str) -> Result<T, ZooError>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|_| ZooError::Validation(format!("invalid {field} '{raw}'")))
}

/// Parse an optional enum argument.
pub fn parse_opt<T>(raw: Option<&str>, field: &str) -> Result<Option<T>, ZooError>
where
    T: DeserializeOwned,
{
    raw.map(|value| parse_enum(value, field)).transpose()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use zoo_core::enums::{Species, WorkingStatus};

    use super::*;

    #[test]
    fn parses_snake_case_enum() {
        let species: Species = parse_enum("dolphin", "species").expect("species should parse");
        assert_eq!(species, Species::Dolphin);
    }

    #[test]
    fn parses_hyphenated_and_capitalised_alias() {
        let status: WorkingStatus = parse_enum("On-Leave", "status").expect("status should parse");
        assert_eq!(status, WorkingStatus::OnLeave);
    }

    #[test]
    fn invalid_value_is_a_validation_error() {
        let err = parse_enum::<Species>("unicorn", "species").expect_err("should fail");
        assert_eq!(err.code(), "validation");
        assert!(err.to_string().contains("invalid species 'unicorn'"));
    }

    #[test]
    fn absent_optional_stays_absent() {
        assert_eq!(parse_opt::<Species>(None, "species").unwrap(), None);
    }
}
