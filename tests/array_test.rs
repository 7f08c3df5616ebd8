//! Integration tests for array fields.

use fieldguard::{ErrorKind, FieldPath, FieldValidator, Schema, SchemaDefinition};
use serde_json::json;

fn team_schema() -> SchemaDefinition {
    let member = Schema::definition()
        .field("name", Schema::string().required().error("Name is required"))
        .field("email", Schema::string().email().error("Invalid email"));

    Schema::definition().field(
        "members",
        Schema::array(member)
            .min_items(2)
            .error("A team needs two members")
            .max_items(4),
    )
}

#[test]
fn test_valid_array() {
    let result = team_schema().validate(&json!({
        "members": [
            {"name": "Ada", "email": "ada@example.com"},
            {"name": "Grace"}
        ]
    }));
    assert!(result.is_ok());
}

#[test]
fn test_short_array_still_validates_items() {
    let result = team_schema().validate(&json!({
        "members": [{"email": "bad"}]
    }));

    assert_eq!(
        result.paths().collect::<Vec<_>>(),
        vec!["members", "members.0.name", "members.0.email"]
    );
    assert_eq!(result.kind("members"), Some(ErrorKind::TooFewItems));
    assert_eq!(result.message("members"), Some("A team needs two members"));
    assert_eq!(result.message("members.0.email"), Some("Invalid email"));
}

#[test]
fn test_empty_array_reports_only_length() {
    let result = team_schema().validate(&json!({"members": []}));

    assert_eq!(result.len(), 1);
    assert_eq!(result.kind("members"), Some(ErrorKind::TooFewItems));
}

#[test]
fn test_max_items() {
    let member = json!({"name": "x"});
    let result = team_schema().validate(&json!({
        "members": [member.clone(), member.clone(), member.clone(), member.clone(), member]
    }));

    assert_eq!(result.kind("members"), Some(ErrorKind::OutOfRange));
    assert_eq!(result.error("members").unwrap().code, "max_items");
}

#[test]
fn test_non_sequence_is_type_mismatch() {
    for value in [json!("Ada"), json!({"name": "Ada"}), json!(3)] {
        let result = team_schema().validate(&json!({"members": value}));
        assert_eq!(result.len(), 1);
        assert_eq!(result.kind("members"), Some(ErrorKind::TypeMismatch));
    }
}

#[test]
fn test_non_record_item_is_type_mismatch_at_index() {
    let result = team_schema().validate(&json!({
        "members": [{"name": "Ada"}, "Grace"]
    }));

    assert_eq!(result.paths().collect::<Vec<_>>(), vec!["members.1"]);
    assert_eq!(result.kind("members.1"), Some(ErrorKind::TypeMismatch));
}

#[test]
fn test_absent_optional_array_skipped() {
    assert!(team_schema().validate(&json!({})).is_ok());
    assert!(team_schema().validate(&json!({"members": null})).is_ok());
}

#[test]
fn test_required_array() {
    let schema = Schema::definition().field(
        "skills",
        Schema::array(Schema::string())
            .required()
            .error("At least one skill is required")
            .min_items(1),
    );

    for value in [json!({}), json!({"skills": []}), json!({"skills": null})] {
        let result = schema.validate(&value);
        assert_eq!(result.len(), 1);
        assert_eq!(result.kind("skills"), Some(ErrorKind::MissingRequired));
        assert_eq!(result.message("skills"), Some("At least one skill is required"));
    }
}

#[test]
fn test_scalar_items() {
    let schema = Schema::definition().field(
        "scores",
        Schema::array(Schema::integer().range(0.0, 100.0).unwrap()),
    );

    let result = schema.validate(&json!({"scores": [10, 101, 2.5, "x", 100]}));
    assert_eq!(
        result.paths().collect::<Vec<_>>(),
        vec!["scores.1", "scores.2", "scores.3"]
    );
    assert_eq!(result.kind("scores.1"), Some(ErrorKind::OutOfRange));
    assert_eq!(result.kind("scores.2"), Some(ErrorKind::TypeMismatch));
    assert_eq!(result.kind("scores.3"), Some(ErrorKind::TypeMismatch));
}

#[test]
fn test_nested_arrays() {
    let row = Schema::definition().field(
        "cells",
        Schema::array(Schema::string().required()).non_empty(),
    );
    let schema = Schema::definition().field("rows", Schema::array(row));

    let result = schema.validate(&json!({
        "rows": [
            {"cells": ["a", "b"]},
            {"cells": []},
            {"cells": ["c", ""]}
        ]
    }));

    assert_eq!(
        result.paths().collect::<Vec<_>>(),
        vec!["rows.1.cells", "rows.2.cells.1"]
    );
    assert_eq!(result.kind("rows.1.cells"), Some(ErrorKind::TooFewItems));
    assert_eq!(result.kind("rows[2].cells[1]"), Some(ErrorKind::MissingRequired));
}

#[test]
fn test_validate_items_keys_failures_by_index() {
    let spec = Schema::array(Schema::string().min_length(2));
    let items = [json!("ok"), json!("x"), json!("fine"), json!("")];

    let failures = spec.validate_items(&items, &json!({}), &FieldPath::from_field("tags"));

    assert_eq!(failures.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
    assert_eq!(failures[&1].first().path.to_string(), "tags.1");
}

#[test]
fn test_array_as_field_validator() {
    let spec = Schema::array(Schema::string()).min_items(1);
    let path = FieldPath::from_field("tags");

    assert!(spec
        .validate_field(Some(&json!(["a"])), &json!({}), &path)
        .is_success());
    assert!(spec
        .validate_field(Some(&json!([])), &json!({}), &path)
        .is_failure());
}
