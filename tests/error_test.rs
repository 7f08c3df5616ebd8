//! Integration tests for FieldError, FieldErrors and SchemaBuildError.

use fieldguard::{ErrorKind, FieldError, FieldErrors, FieldPath, Schema, SchemaBuildError};
use serde_json::json;
use std::error::Error;
use stillwater::prelude::*;
use stillwater::Validation;

#[test]
fn test_field_error_full_context() {
    let error = FieldError::new(
        FieldPath::from_field("experience"),
        ErrorKind::OutOfRange,
        "too much experience",
    )
    .with_code("max_value")
    .with_got("11")
    .with_expected("at most 10");

    assert_eq!(error.path.to_string(), "experience");
    assert_eq!(error.kind, ErrorKind::OutOfRange);
    assert_eq!(error.code, "max_value");
    assert_eq!(error.got, Some("11".to_string()));
    assert_eq!(error.expected, Some("at most 10".to_string()));
    assert_eq!(
        error.to_string(),
        "experience: too much experience (expected: at most 10) (got: 11)"
    );
}

#[test]
fn test_default_codes() {
    let codes: Vec<&str> = [
        ErrorKind::MissingRequired,
        ErrorKind::TypeMismatch,
        ErrorKind::FormatInvalid,
        ErrorKind::OutOfRange,
        ErrorKind::TooFewItems,
        ErrorKind::NotAccepted,
    ]
    .iter()
    .map(ErrorKind::default_code)
    .collect();

    assert_eq!(
        codes,
        vec![
            "required",
            "invalid_type",
            "format",
            "out_of_range",
            "too_few_items",
            "not_accepted"
        ]
    );
}

#[test]
fn test_root_error_display() {
    let error = FieldError::new(FieldPath::root(), ErrorKind::TypeMismatch, "expected record");
    assert_eq!(error.to_string(), "(root): expected record");
}

#[test]
fn test_errors_combine_via_semigroup() {
    let e1 = FieldErrors::single(FieldError::new(
        FieldPath::from_field("firstName"),
        ErrorKind::MissingRequired,
        "First Name is required",
    ));
    let e2 = FieldErrors::single(FieldError::new(
        FieldPath::from_field("email"),
        ErrorKind::FormatInvalid,
        "Invalid email",
    ));
    let e3 = FieldErrors::single(FieldError::new(
        FieldPath::from_field("agreeTerms"),
        ErrorKind::NotAccepted,
        "You must agree to the terms and conditions",
    ));

    let combined = e1.combine(e2).combine(e3);

    assert_eq!(combined.len(), 3);
    assert!(!combined.is_empty());
    assert_eq!(combined.first().path.to_string(), "firstName");
    assert_eq!(combined.of_kind(ErrorKind::FormatInvalid).len(), 1);
    assert_eq!(combined.at_path(&FieldPath::from_field("agreeTerms")).len(), 1);
    assert_eq!(combined.with_code("required").len(), 1);
}

#[test]
fn test_from_vec() {
    assert!(FieldErrors::from_vec(Vec::new()).is_none());

    let errors = FieldErrors::from_vec(vec![
        FieldError::new(FieldPath::from_field("a"), ErrorKind::MissingRequired, "a"),
        FieldError::new(FieldPath::from_field("b"), ErrorKind::MissingRequired, "b"),
    ])
    .unwrap();

    let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
    assert_eq!(messages, vec!["a", "b"]);
}

#[test]
fn test_result_converts_to_validation() {
    let schema = Schema::definition()
        .field("firstName", Schema::string().required())
        .field("email", Schema::string().email());

    let validation = schema
        .validate(&json!({"email": "nope"}))
        .into_validation();

    match validation {
        Validation::Failure(errors) => {
            assert_eq!(errors.len(), 2);
            assert_eq!(errors.first().kind, ErrorKind::MissingRequired);
        }
        Validation::Success(()) => panic!("expected failure"),
    }
}

#[test]
fn test_invalid_pattern_is_build_error() {
    let err = Schema::string().pattern("(unclosed").unwrap_err();

    assert!(matches!(err, SchemaBuildError::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
    assert!(err.source().is_some());
}

#[test]
fn test_inverted_range_is_build_error() {
    let err = Schema::number().range(10.0, 0.0).unwrap_err();
    assert!(matches!(err, SchemaBuildError::InvalidRange { .. }));
}
