use recordgen_core::{Error, Schema, validate_schema};

fn schema(json: &str) -> Schema {
    Schema::from_json_str(json).expect("parse schema")
}

#[test]
fn accepts_consistent_schema() {
    let schema = schema(
        r#"{"models": {
            "user": {"relationships": {"group": {"type": "hasOne", "model": "group"}}},
            "group": {"relationships": {"members": {"type": "hasMany", "model": ["user", "group"]}}}
        }}"#,
    );
    validate_schema(&schema).expect("schema should validate");
}

#[test]
fn rejects_unknown_relationship_target() {
    let schema = schema(
        r#"{"models": {"user": {"relationships": {"group": {"type": "hasOne", "model": "team"}}}}}"#,
    );
    let err = validate_schema(&schema).expect_err("unknown target");
    match err {
        Error::InvalidSchema(message) => assert!(message.contains("user.group -> team")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn rejects_empty_model_name() {
    let schema = schema(r#"{"models": {"": {}}}"#);
    assert!(matches!(validate_schema(&schema), Err(Error::InvalidSchema(_))));
}

#[test]
fn rejects_empty_attribute_name() {
    let schema = schema(r#"{"models": {"user": {"attributes": {"": {"type": "string"}}}}}"#);
    assert!(matches!(validate_schema(&schema), Err(Error::InvalidSchema(_))));
}
