use chronicle_mapper::{AuditConfig, DEFAULT_TYPE_FIELD, FlatRecord, MapperError};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

// ── AuditConfig ──────────────────────────────────────────────────

#[test]
fn default_config() {
    let config = AuditConfig::default();
    assert_eq!(config.modified_flag_suffix, "_MOD");
    assert!(config.global_with_modified_flag);
    assert_eq!(config.type_field, DEFAULT_TYPE_FIELD);
}

#[test]
fn config_from_partial_json_keeps_defaults() {
    let config = AuditConfig::from_json(r#"{"modified_flag_suffix": "_CHG"}"#).unwrap();
    assert_eq!(config.modified_flag_suffix, "_CHG");
    assert!(config.global_with_modified_flag);
    assert_eq!(config.type_field, "@type");
}

#[test]
fn config_from_invalid_json_fails() {
    assert!(matches!(
        AuditConfig::from_json("{"),
        Err(MapperError::Serialization(_))
    ));
}

#[test]
fn property_uses_configured_suffix() {
    let config = AuditConfig {
        modified_flag_suffix: "_CHG".to_string(),
        ..AuditConfig::default()
    };
    assert_eq!(config.property("name").modified_flag_name(), Some("name_CHG"));
}

#[test]
fn property_without_global_flag() {
    let config = AuditConfig {
        global_with_modified_flag: false,
        ..AuditConfig::default()
    };
    assert!(!config.property("name").is_using_modified_flag());
}

// ── FlatRecord ───────────────────────────────────────────────────

#[test]
fn record_values_and_flags() {
    let mut record = FlatRecord::new();
    assert!(record.is_empty());

    record.insert("name", json!("Bob"));
    record.insert("nick", Value::Null);
    record.set_flag("name_MOD", true);

    assert_eq!(record.get("name"), Some(&json!("Bob")));
    assert_eq!(record.value("missing"), Value::Null);
    assert!(record.is_null("nick"));
    assert!(record.is_null("missing"));
    assert!(!record.is_null("name"));
    assert_eq!(record.flag("name_MOD"), Some(true));
    assert_eq!(record.flag("nick_MOD"), None);
}

#[test]
fn record_into_parts() {
    let mut record = FlatRecord::new();
    record.insert("name", json!("Bob"));
    record.set_flag("name_MOD", false);

    let (data, flags) = record.into_parts();
    assert_eq!(data.get("name"), Some(&json!("Bob")));
    assert_eq!(flags.get("name_MOD"), Some(&false));
}

#[test]
fn record_serde_roundtrip() {
    let mut record = FlatRecord::new();
    record.insert("name", json!("Bob"));
    record.set_flag("name_MOD", true);

    let json = serde_json::to_string(&record).unwrap();
    let parsed: FlatRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, record);
}
