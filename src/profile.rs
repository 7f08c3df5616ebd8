//! A ready-made schema for the candidate profile form.
//!
//! The profile form collects personal details, a list of projects and a CV.
//! The CV arrives either as a website link or as an uploaded document,
//! depending on the `cvType` field, so the `websiteLink` and `file` fields are
//! conditional on it.

use crate::error::SchemaBuildError;
use crate::schema::{Schema, SchemaDefinition};

/// MIME types accepted for an uploaded CV.
pub const ACCEPTED_CV_TYPES: [&str; 2] = ["application/pdf", "application/msword"];

/// Builds the profile form schema.
///
/// # Errors
///
/// Returns a `SchemaBuildError` if one of the built-in patterns or ranges is
/// rejected, which does not happen for the shipped definitions.
///
/// # Example
///
/// ```rust
/// use fieldguard::profile::profile_schema;
/// use serde_json::json;
///
/// let schema = profile_schema().unwrap();
/// let result = schema.validate(&json!({"cvType": "online", "websiteLink": ""}));
///
/// assert_eq!(result.message("websiteLink"), Some("Website Link is required"));
/// assert!(result.error("file").is_none());
/// ```
pub fn profile_schema() -> Result<SchemaDefinition, SchemaBuildError> {
    let project = Schema::definition()
        .field(
            "projectName",
            Schema::string().required().error("Project Name is required"),
        )
        .field(
            "projectDescription",
            Schema::string()
                .required()
                .error("Project Description is required"),
        );

    let schema = Schema::definition()
        .field(
            "firstName",
            Schema::string().required().error("First Name is required"),
        )
        .field(
            "lastName",
            Schema::string().required().error("Last Name is required"),
        )
        .field("education", Schema::string())
        .field("dob", Schema::string().required().error("DOB is required"))
        .field(
            "email",
            Schema::string()
                .required()
                .error("Email is required")
                .email()
                .error("Invalid email"),
        )
        .field(
            "projects",
            Schema::array(project)
                .min_items(1)
                .error("At least one project is required"),
        )
        .field(
            "cvType",
            Schema::string().required().error("CV Type is required"),
        )
        .field(
            "websiteLink",
            Schema::conditional("cvType").when(
                "online",
                Schema::string()
                    .required()
                    .error("Website Link is required")
                    .url()
                    .error("Invalid website link"),
            ),
        )
        .field(
            "file",
            Schema::conditional("cvType").when(
                "offline",
                Schema::file()
                    .error("Invalid file format")
                    .required()
                    .error("File is required")
                    .accepted_mime_types(ACCEPTED_CV_TYPES, "Invalid file format"),
            ),
        )
        .field("degreeType", Schema::array(Schema::string()))
        .field("address", Schema::string())
        .field(
            "mobileNumber",
            Schema::string()
                .required()
                .error("Mobile number is required")
                .pattern(r"\d{10}")?
                .error("Invalid mobile number"),
        )
        .field(
            "pinCode",
            Schema::string().pattern(r"\d{6}")?.error("Invalid pin code"),
        )
        .field("emergencyNumber", Schema::string())
        .field(
            "profilePhoto",
            Schema::string()
                .required()
                .error("Profile Photo is required"),
        )
        .field("coverPhoto", Schema::string())
        .field(
            "experience",
            Schema::number()
                .required()
                .error("Years of experience is required")
                .range(0.0, 10.0)?,
        )
        .field(
            "skills",
            Schema::array(Schema::string())
                .required()
                .error("At least one skill is required"),
        )
        .field(
            "aboutMe",
            Schema::string()
                .required()
                .error("Description is required")
                .max_length(250)
                .error("Description should be at most 250 characters"),
        )
        .field(
            "agreeTerms",
            Schema::boolean()
                .one_of([true])
                .error("You must agree to the terms and conditions"),
        );

    Ok(schema)
}
