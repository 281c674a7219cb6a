use chronicle_types::{AccessType, PropertyKey};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

// ── Construction ─────────────────────────────────────────────────

#[test]
fn new_key_reads_attribute_of_same_name() {
    let key = PropertyKey::new("title");
    assert_eq!(key.name(), "title");
    assert_eq!(key.bean_name(), Some("title"));
    assert_eq!(key.attribute(), "title");
    assert_eq!(key.access_type(), AccessType::Field);
}

#[test]
fn new_key_records_default_modified_flag() {
    let key = PropertyKey::new("title");
    assert!(key.is_using_modified_flag());
    assert_eq!(key.modified_flag_name(), Some("title_MOD"));
}

#[test]
fn dynamic_key_has_no_bean_name() {
    let key = PropertyKey::dynamic("title");
    assert_eq!(key.bean_name(), None);
    assert_eq!(key.attribute(), "title");
}

#[test]
fn builder_methods_override_metadata() {
    let key = PropertyKey::new("title")
        .with_bean_name("headline")
        .with_access_type(AccessType::Property)
        .with_modified_flag_suffix("_CHANGED");
    assert_eq!(key.attribute(), "headline");
    assert_eq!(key.access_type(), AccessType::Property);
    assert_eq!(key.modified_flag_name(), Some("title_CHANGED"));
}

#[test]
fn without_modified_flag_clears_flag() {
    let key = PropertyKey::new("title").without_modified_flag();
    assert!(!key.is_using_modified_flag());
    assert_eq!(key.modified_flag_name(), None);
}

// ── Prefixing ────────────────────────────────────────────────────

#[test]
fn prefixed_renames_but_keeps_attribute() {
    let key = PropertyKey::new("city").prefixed("address_");
    assert_eq!(key.name(), "address_city");
    assert_eq!(key.attribute(), "city");
    assert_eq!(key.modified_flag_name(), Some("address_city_MOD"));
}

#[test]
fn prefixed_dynamic_key_keeps_local_name_as_attribute() {
    let key = PropertyKey::dynamic("city").prefixed("address_");
    assert_eq!(key.name(), "address_city");
    assert_eq!(key.bean_name(), Some("city"));
}

#[test]
fn prefixed_without_flag_stays_without_flag() {
    let key = PropertyKey::new("city").without_modified_flag().prefixed("address_");
    assert_eq!(key.modified_flag_name(), None);
}

// ── Serde ────────────────────────────────────────────────────────

#[test]
fn key_serde_roundtrip() {
    let key = PropertyKey::new("title").with_access_type(AccessType::Property);
    let json = serde_json::to_string(&key).unwrap();
    let parsed: PropertyKey = serde_json::from_str(&json).unwrap();
    assert_eq!(key, parsed);
}

#[test]
fn key_deserializes_with_defaults() {
    let key: PropertyKey = serde_json::from_str(r#"{"name":"title"}"#).unwrap();
    assert_eq!(key.name(), "title");
    assert_eq!(key.bean_name(), None);
    assert_eq!(key.access_type(), AccessType::Field);
    assert_eq!(key.modified_flag_name(), None);
}

#[test]
fn access_type_serializes_snake_case() {
    assert_eq!(serde_json::to_string(&AccessType::Property).unwrap(), "\"property\"");
    assert_eq!(AccessType::Field.to_string(), "field");
}

#[test]
fn display_is_name() {
    assert_eq!(PropertyKey::new("title").to_string(), "title");
}

proptest! {
    /// The flag name always follows the external name through prefixing.
    #[test]
    fn prefixed_flag_tracks_name(name in "[a-z]{1,12}", prefix in "[a-z]{1,8}_") {
        let key = PropertyKey::new(name.clone()).prefixed(&prefix);
        let expected_flag = format!("{}_MOD", key.name());
        prop_assert_eq!(key.modified_flag_name(), Some(expected_flag.as_str()));
        prop_assert_eq!(key.attribute(), name.as_str());
    }
}
