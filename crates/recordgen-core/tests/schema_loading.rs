use std::fs;

use recordgen_core::{RelationshipKind, RelationshipModel, Schema};

const SCHEMA_JSON: &str = r#"{
  "models": {
    "user": {
      "attributes": {
        "username": { "type": "string" },
        "age": { "type": "integer" },
        "permission": { "type": "object", "ts": "Permission" }
      },
      "relationships": {
        "group": { "type": "hasOne", "model": "group", "inverse": "users" }
      },
      "keys": { "remoteId": {} }
    },
    "group": {
      "relationships": {
        "users": { "type": "hasMany", "model": "user" }
      }
    },
    "audit": {}
  }
}"#;

#[test]
fn preserves_declaration_order() {
    let schema = Schema::from_json_str(SCHEMA_JSON).expect("parse schema");

    let models: Vec<&str> = schema.models.keys().map(String::as_str).collect();
    assert_eq!(models, vec!["user", "group", "audit"]);

    let user = &schema.models["user"];
    let attributes: Vec<&str> = user
        .attributes
        .as_ref()
        .expect("user attributes")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(attributes, vec!["username", "age", "permission"]);
    assert!(user.keys.is_some());
}

#[test]
fn decodes_relationships() {
    let schema = Schema::from_json_str(SCHEMA_JSON).expect("parse schema");

    let group = &schema.models["user"].relationships.as_ref().expect("relationships")["group"];
    assert_eq!(group.kind, RelationshipKind::HasOne);
    assert_eq!(group.model, Some(RelationshipModel::One("group".to_string())));
    assert_eq!(group.inverse.as_deref(), Some("users"));
}

#[test]
fn empty_collections_are_not_declared() {
    let schema = Schema::from_json_str(
        r#"{"models": {"user": {"attributes": {}, "relationships": {}}}}"#,
    )
    .expect("parse schema");

    let user = &schema.models["user"];
    assert!(user.attributes.is_some());
    assert!(user.declared_attributes().is_none());
    assert!(user.declared_relationships().is_none());
}

#[test]
fn missing_models_defaults_to_empty() {
    let schema = Schema::from_json_str("{}").expect("parse schema");
    assert!(schema.models.is_empty());
}

#[test]
fn reads_schema_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("schema.json");
    fs::write(&path, SCHEMA_JSON).expect("write schema");

    let schema = Schema::from_json_file(&path).expect("read schema");
    assert_eq!(schema.models.len(), 3);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = Schema::from_json_file(&dir.path().join("missing.json")).expect_err("missing file");
    assert!(matches!(err, recordgen_core::Error::Io(_)));
}
