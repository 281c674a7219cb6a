use chronicle_types::{ChangeRecord, Error, Revision, RevisionType};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::str::FromStr;

// ── RevisionType ─────────────────────────────────────────────────

#[test]
fn revision_type_codes() {
    assert_eq!(RevisionType::Add.code(), 0);
    assert_eq!(RevisionType::Mod.code(), 1);
    assert_eq!(RevisionType::Del.code(), 2);
}

#[test]
fn revision_type_from_code() {
    assert_eq!(RevisionType::from_code(0).unwrap(), RevisionType::Add);
    assert_eq!(RevisionType::from_code(2).unwrap(), RevisionType::Del);
    assert!(matches!(
        RevisionType::from_code(7),
        Err(Error::InvalidRevisionType(_))
    ));
}

#[test]
fn revision_type_parse_is_case_insensitive() {
    assert_eq!(RevisionType::from_str("ADD").unwrap(), RevisionType::Add);
    assert_eq!(RevisionType::from_str("mod").unwrap(), RevisionType::Mod);
    assert!(RevisionType::from_str("upsert").is_err());
}

#[test]
fn revision_type_display() {
    assert_eq!(RevisionType::Del.to_string(), "del");
}

// ── ChangeRecord ─────────────────────────────────────────────────

#[test]
fn new_record_has_empty_data() {
    let record = ChangeRecord::new("Person_tags_AUD", json!("rust"), RevisionType::Add);
    assert_eq!(record.entity_name, "Person_tags_AUD");
    assert!(record.data.is_empty());
    assert_eq!(record.changed_element, json!("rust"));
}

#[test]
fn record_json_roundtrip() {
    let mut record = ChangeRecord::new("Person_tags_AUD", json!({"id": 4}), RevisionType::Del);
    record.data.insert("tags_id".into(), json!(4));
    let json = record.to_json().unwrap();
    assert!(json.contains("\"revision_type\":\"del\""));
    assert_eq!(ChangeRecord::from_json(&json).unwrap(), record);
}

#[test]
fn record_from_invalid_json_fails() {
    assert!(matches!(
        ChangeRecord::from_json("{not json"),
        Err(Error::Serialization(_))
    ));
}

// ── Revision ─────────────────────────────────────────────────────

#[test]
fn revision_display_and_parse() {
    let revision = Revision::new(42);
    assert_eq!(revision.to_string(), "42");
    assert_eq!(Revision::parse("42").unwrap(), revision);
    assert_eq!(Revision::from_str(" 7 ").unwrap().number(), 7);
}

#[test]
fn revision_parse_invalid() {
    assert!(matches!(Revision::parse("-1"), Err(Error::InvalidRevision(_))));
    assert!(Revision::parse("abc").is_err());
}

#[test]
fn revisions_are_ordered() {
    assert!(Revision::from(1) < Revision::from(2));
}

#[test]
fn revision_serializes_transparently() {
    assert_eq!(serde_json::to_string(&Revision::new(9)).unwrap(), "9");
}
