//! Integration tests for the profile form schema.

use fieldguard::profile::profile_schema;
use fieldguard::{ErrorKind, FileDescriptor, SchemaDefinition};
use serde_json::{json, Value};

fn schema() -> SchemaDefinition {
    profile_schema().unwrap()
}

fn valid_profile() -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "education": "Self-taught",
        "dob": "1815-12-10",
        "email": "ada@example.com",
        "projects": [
            {"projectName": "Engine", "projectDescription": "Notes on the analytical engine"}
        ],
        "cvType": "online",
        "websiteLink": "https://ada.example.com",
        "degreeType": ["bachelor"],
        "mobileNumber": "1234567890",
        "pinCode": "411001",
        "profilePhoto": "ada.png",
        "experience": 5,
        "skills": ["mathematics"],
        "aboutMe": "First programmer.",
        "agreeTerms": true
    })
}

fn with(mut record: Value, key: &str, value: Value) -> Value {
    record[key] = value;
    record
}

fn without(mut record: Value, key: &str) -> Value {
    if let Some(map) = record.as_object_mut() {
        map.remove(key);
    }
    record
}

#[test]
fn test_valid_profile_passes() {
    let result = schema().validate(&valid_profile());
    assert!(result.is_ok(), "unexpected errors: {:?}", result);
}

#[test]
fn test_empty_record_reports_every_required_field() {
    let result = schema().validate(&json!({}));

    assert_eq!(
        result.paths().collect::<Vec<_>>(),
        vec![
            "firstName",
            "lastName",
            "dob",
            "email",
            "cvType",
            "mobileNumber",
            "profilePhoto",
            "experience",
            "skills",
            "aboutMe",
        ]
    );
    assert!(result
        .iter()
        .all(|(_, error)| error.kind == ErrorKind::MissingRequired));
    assert_eq!(result.message("experience"), Some("Years of experience is required"));
}

#[test]
fn test_required_before_format() {
    let record = with(valid_profile(), "mobileNumber", json!(""));
    let result = schema().validate(&record);

    assert_eq!(result.len(), 1);
    assert_eq!(result.message("mobileNumber"), Some("Mobile number is required"));
    assert_eq!(result.kind("mobileNumber"), Some(ErrorKind::MissingRequired));
}

#[test]
fn test_pattern_exactness() {
    let result = schema().validate(&with(valid_profile(), "mobileNumber", json!("12345")));
    assert_eq!(result.message("mobileNumber"), Some("Invalid mobile number"));
    assert_eq!(result.kind("mobileNumber"), Some(ErrorKind::FormatInvalid));

    let result = schema().validate(&with(valid_profile(), "mobileNumber", json!("1234567890")));
    assert!(result.error("mobileNumber").is_none());

    for bad in ["12345678901", "123456789a", " 1234567890", "1234567890\n"] {
        let result = schema().validate(&with(valid_profile(), "mobileNumber", json!(bad)));
        assert_eq!(result.kind("mobileNumber"), Some(ErrorKind::FormatInvalid), "{:?}", bad);
    }
}

#[test]
fn test_optional_pin_code() {
    let result = schema().validate(&without(valid_profile(), "pinCode"));
    assert!(result.is_ok());

    let result = schema().validate(&with(valid_profile(), "pinCode", json!("4110")));
    assert_eq!(result.message("pinCode"), Some("Invalid pin code"));

    let result = schema().validate(&with(valid_profile(), "pinCode", json!("")));
    assert_eq!(result.message("pinCode"), Some("Invalid pin code"));
}

#[test]
fn test_online_cv_requires_website_link() {
    let record = with(valid_profile(), "websiteLink", json!(""));
    let record = with(record, "file", json!("not a file"));
    let result = schema().validate(&record);

    assert_eq!(result.message("websiteLink"), Some("Website Link is required"));
    assert_eq!(result.kind("websiteLink"), Some(ErrorKind::MissingRequired));
    assert!(result.error("file").is_none());
}

#[test]
fn test_online_cv_checks_link_format() {
    let result = schema().validate(&with(valid_profile(), "websiteLink", json!("not a url")));
    assert_eq!(result.message("websiteLink"), Some("Invalid website link"));
    assert_eq!(result.kind("websiteLink"), Some(ErrorKind::FormatInvalid));
}

#[test]
fn test_offline_cv_accepts_pdf() {
    let record = with(valid_profile(), "cvType", json!("offline"));
    let record = with(record, "websiteLink", json!("not a url"));
    let record = with(
        record,
        "file",
        FileDescriptor::new("cv.pdf", "application/pdf").with_size(48_213).into(),
    );

    let result = schema().validate(&record);
    assert!(result.is_ok(), "unexpected errors: {:?}", result);
}

#[test]
fn test_offline_cv_accepts_file_list() {
    let record = with(valid_profile(), "cvType", json!("offline"));
    let record = with(
        record,
        "file",
        json!([{"name": "cv.doc", "type": "application/msword"}]),
    );

    assert!(schema().validate(&record).is_ok());
}

#[test]
fn test_offline_cv_rejects_other_formats() {
    let record = with(valid_profile(), "cvType", json!("offline"));
    let record = with(record, "file", FileDescriptor::new("cv.png", "image/png").into());

    let result = schema().validate(&record);
    assert_eq!(result.len(), 1);
    assert_eq!(result.message("file"), Some("Invalid file format"));
    assert_eq!(result.kind("file"), Some(ErrorKind::FormatInvalid));
    assert_eq!(result.error("file").unwrap().code, "mime_type");
}

#[test]
fn test_offline_cv_checks_declared_type_only() {
    let record = with(valid_profile(), "cvType", json!("offline"));

    let result = schema().validate(&with(record.clone(), "file", json!({"type": "application/pdf"})));
    assert!(result.is_ok(), "unexpected errors: {:?}", result);

    let result = schema().validate(&with(record, "file", FileDescriptor::of_type("image/png").into()));
    assert_eq!(result.message("file"), Some("Invalid file format"));
    assert_eq!(result.kind("file"), Some(ErrorKind::FormatInvalid));
}

#[test]
fn test_offline_cv_requires_file() {
    let record = with(valid_profile(), "cvType", json!("offline"));
    let result = schema().validate(&record);
    assert_eq!(result.message("file"), Some("File is required"));

    let record = with(record, "file", json!([]));
    let result = schema().validate(&record);
    assert_eq!(result.message("file"), Some("File is required"));
}

#[test]
fn test_offline_cv_rejects_non_file_value() {
    let record = with(valid_profile(), "cvType", json!("offline"));
    let record = with(record, "file", json!("cv.pdf"));

    let result = schema().validate(&record);
    assert_eq!(result.message("file"), Some("Invalid file format"));
    assert_eq!(result.kind("file"), Some(ErrorKind::TypeMismatch));
}

#[test]
fn test_unknown_cv_type_skips_conditional_fields() {
    let record = with(valid_profile(), "cvType", json!("email"));
    let record = with(record, "websiteLink", json!("not a url"));
    let record = with(record, "file", FileDescriptor::new("cv.png", "image/png").into());

    let result = schema().validate(&record);
    assert!(result.is_ok(), "unexpected errors: {:?}", result);
}

#[test]
fn test_empty_projects_is_too_few_items_only() {
    let result = schema().validate(&with(valid_profile(), "projects", json!([])));

    assert_eq!(result.len(), 1);
    assert_eq!(result.kind("projects"), Some(ErrorKind::TooFewItems));
    assert_eq!(result.message("projects"), Some("At least one project is required"));
}

#[test]
fn test_project_item_errors_are_index_qualified() {
    let record = with(
        valid_profile(),
        "projects",
        json!([{"projectName": "", "projectDescription": "x"}]),
    );
    let result = schema().validate(&record);

    assert_eq!(result.paths().collect::<Vec<_>>(), vec!["projects.0.projectName"]);
    assert_eq!(
        result.message("projects.0.projectName"),
        Some("Project Name is required")
    );
    assert_eq!(
        result.kind("projects[0].projectName"),
        Some(ErrorKind::MissingRequired)
    );
}

#[test]
fn test_every_project_is_validated() {
    let record = with(
        valid_profile(),
        "projects",
        json!([
            {"projectName": "A", "projectDescription": "ok"},
            {"projectName": "B"},
            {"projectDescription": "no name"}
        ]),
    );
    let result = schema().validate(&record);

    assert_eq!(
        result.paths().collect::<Vec<_>>(),
        vec!["projects.1.projectDescription", "projects.2.projectName"]
    );
}

#[test]
fn test_experience_boundaries() {
    for ok in [json!(0), json!(10), json!(7.5)] {
        let result = schema().validate(&with(valid_profile(), "experience", ok.clone()));
        assert!(result.error("experience").is_none(), "{}", ok);
    }

    for bad in [json!(11), json!(-1), json!(10.01)] {
        let result = schema().validate(&with(valid_profile(), "experience", bad.clone()));
        assert_eq!(result.kind("experience"), Some(ErrorKind::OutOfRange), "{}", bad);
    }

    let result = schema().validate(&with(valid_profile(), "experience", json!("five")));
    assert_eq!(result.kind("experience"), Some(ErrorKind::TypeMismatch));
}

#[test]
fn test_skills_required() {
    let result = schema().validate(&with(valid_profile(), "skills", json!([])));
    assert_eq!(result.message("skills"), Some("At least one skill is required"));

    let result = schema().validate(&with(valid_profile(), "skills", json!(["rust", 3])));
    assert_eq!(result.kind("skills.1"), Some(ErrorKind::TypeMismatch));
}

#[test]
fn test_about_me_length() {
    let at_limit = "a".repeat(250);
    let result = schema().validate(&with(valid_profile(), "aboutMe", json!(at_limit)));
    assert!(result.is_ok());

    let over = "a".repeat(251);
    let result = schema().validate(&with(valid_profile(), "aboutMe", json!(over)));
    assert_eq!(
        result.message("aboutMe"),
        Some("Description should be at most 250 characters")
    );
    assert_eq!(result.kind("aboutMe"), Some(ErrorKind::OutOfRange));
}

#[test]
fn test_agree_terms() {
    let result = schema().validate(&with(valid_profile(), "agreeTerms", json!(false)));
    assert_eq!(
        result.message("agreeTerms"),
        Some("You must agree to the terms and conditions")
    );
    assert_eq!(result.kind("agreeTerms"), Some(ErrorKind::NotAccepted));

    let result = schema().validate(&without(valid_profile(), "agreeTerms"));
    assert!(result.is_ok());
}

#[test]
fn test_email_format() {
    let result = schema().validate(&with(valid_profile(), "email", json!("ada-at-example")));
    assert_eq!(result.message("email"), Some("Invalid email"));
}

#[test]
fn test_validation_is_idempotent() {
    let schema = schema();
    let record = json!({
        "cvType": "offline",
        "file": {"name": "cv.png", "type": "image/png"},
        "projects": [{"projectName": ""}],
        "experience": 11
    });

    let first = schema.validate(&record);
    let second = schema.validate(&record);

    assert_eq!(first, second);
    assert_eq!(first.to_json(), second.to_json());
}

#[test]
fn test_record_is_not_mutated() {
    let record = with(valid_profile(), "projects", json!([]));
    let before = record.clone();

    let _ = schema().validate(&record);
    assert_eq!(record, before);
}

#[test]
fn test_to_json_maps_paths_to_messages() {
    let record = with(valid_profile(), "mobileNumber", json!("12"));
    let record = with(record, "agreeTerms", json!(false));

    assert_eq!(
        schema().validate(&record).to_json(),
        json!({
            "mobileNumber": "Invalid mobile number",
            "agreeTerms": "You must agree to the terms and conditions"
        })
    );
}
