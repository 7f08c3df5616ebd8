//! # Fieldguard
//!
//! A validation engine for form records whose rules for some fields depend on
//! the values of other fields in the same record.
//!
//! ## Overview
//!
//! A schema is declared once as an immutable [`SchemaDefinition`] and then
//! used to validate any number of records, from any number of threads. Each
//! field carries an ordered chain of [`Rule`]s that stops at the first
//! failure, so every failing field reports exactly one message. Fields can be
//! made conditional on a sibling discriminator field, resolved fresh for every
//! record, and sequence fields validate every item alongside their length
//! constraints.
//!
//! Records are `serde_json::Value` objects. Validation never panics on
//! malformed input: shapes that don't match are reported as
//! [`ErrorKind::TypeMismatch`].
//!
//! ## Core Types
//!
//! - [`Schema`]: Entry point for creating field specs and definitions
//! - [`FieldSpec`]: A short-circuiting rule chain for one field
//! - [`ConditionalSpec`]: Selects a field's chain from a discriminator value
//! - [`ArrayFieldSpec`]: Validates sequence length and every item
//! - [`Validator`] / [`ValidationResult`]: One validation pass and its errors
//! - [`SchemaRegistry`]: Named schemas shared across a host
//!
//! ## Example
//!
//! ```rust
//! use fieldguard::{ErrorKind, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::definition()
//!     .field("cvType", Schema::string().required().error("CV Type is required"))
//!     .field(
//!         "websiteLink",
//!         Schema::conditional("cvType").when(
//!             "online",
//!             Schema::string()
//!                 .required()
//!                 .error("Website Link is required")
//!                 .url()
//!                 .error("Invalid website link"),
//!         ),
//!     )
//!     .field(
//!         "mobileNumber",
//!         Schema::string()
//!             .required()
//!             .error("Mobile number is required")
//!             .pattern(r"\d{10}")
//!             .unwrap()
//!             .error("Invalid mobile number"),
//!     );
//!
//! let result = schema.validate(&json!({
//!     "cvType": "online",
//!     "websiteLink": "",
//!     "mobileNumber": "12345",
//! }));
//!
//! assert!(!result.is_ok());
//! assert_eq!(result.message("websiteLink"), Some("Website Link is required"));
//! assert_eq!(result.kind("mobileNumber"), Some(ErrorKind::FormatInvalid));
//!
//! // The link is only checked for online CVs.
//! let result = schema.validate(&json!({"cvType": "offline", "mobileNumber": "1234567890"}));
//! assert!(result.is_ok());
//! ```

pub mod error;
pub mod file;
pub mod path;
pub mod profile;
pub mod registry;
pub mod schema;
pub mod validation;

pub use error::{ErrorKind, FieldError, FieldErrors, SchemaBuildError};
pub use file::FileDescriptor;
pub use path::{FieldPath, PathSegment};
pub use registry::{RegistryError, SchemaRegistry};
pub use schema::{
    ArrayFieldSpec, Branch, ConditionalSpec, FieldRule, FieldSpec, FieldValidator, ItemSchema,
    PredicateFn, Resolution, Rule, Schema, SchemaDefinition, ValueKind,
};
pub use validation::{ValidationResult, Validator, ValidatorOptions};
