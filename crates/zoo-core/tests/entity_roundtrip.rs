//! Serde roundtrip and JsonSchema validation tests for the stored entities.

use std::collections::BTreeSet;

use chrono::Utc;
use schemars::schema_for;
use zoo_core::entities::*;
use zoo_core::enums::*;
use zoo_core::ids::EntityKind;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

roundtrip_and_validate!(
    assigned_animal_roundtrip,
    Animal,
    Animal {
        id: "A-0001".into(),
        name: "Vixen".into(),
        species: Species::Fox,
        age: 4,
        gender: Gender::Female,
        health: HealthStatus::Healthy,
        enclosure_id: Some("E-0001".into()),
        registered_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    staffed_enclosure_roundtrip,
    Enclosure,
    Enclosure {
        id: "E-0001".into(),
        name: "Fox Den".into(),
        area: 350.5,
        temperature: 12.0,
        location: LocationType::Outdoor,
        environment: EnvironmentType::Mixed,
        inhabitants: BTreeSet::from(["A-0001".to_string()]),
        caretakers: BTreeSet::from(["K-0001".to_string(), "K-0002".to_string()]),
        registered_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    keeper_roundtrip,
    ZooKeeper,
    ZooKeeper {
        id: "K-0247".into(),
        name: "Ada Lovelace".into(),
        department: Department::Mammals,
        rank: Rank::Head,
        working_status: WorkingStatus::OnLeave,
        danger_handling: true,
        licenses: vec!["big-cats".into(), "tranquilizer".into()],
        registered_at: Utc::now(),
    }
);

#[test]
fn animal_json_uses_snake_case_enums() {
    let animal = Animal {
        id: "A-0002".into(),
        name: "Rex".into(),
        species: Species::Crocodile,
        age: 30,
        gender: Gender::Unknown,
        health: HealthStatus::Quarantined,
        enclosure_id: None,
        registered_at: Utc::now(),
    };
    let json = serde_json::to_value(&animal).unwrap();
    assert_eq!(json["species"], "crocodile");
    assert_eq!(json["health"], "quarantined");
    assert!(json["enclosure_id"].is_null());
}

#[test]
fn schema_rejects_age_outside_u8() {
    let schema = serde_json::to_value(schema_for!(NewAnimal)).unwrap();
    let instance = serde_json::json!({
        "name": "Dumbo",
        "species": "elephant",
        "age": 300,
        "gender": "male",
        "health": "healthy",
    });
    assert!(!validate_against_schema(&schema, &instance).is_empty());
}

#[test]
fn entity_kind_accepts_keeper_alias() {
    let kind: EntityKind = serde_json::from_str("\"keeper\"").unwrap();
    assert_eq!(kind, EntityKind::ZooKeeper);
}
