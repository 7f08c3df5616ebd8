//! Full-record validation.
//!
//! This module provides the [`Validator`] that orchestrates one pass over a
//! [`SchemaDefinition`] and the [`ValidationResult`] it produces.

use indexmap::IndexMap;
use rayon::prelude::*;
use serde_json::{Map, Value};
use stillwater::Validation;
use tracing::debug;

use crate::error::{ErrorKind, FieldError, FieldErrors};
use crate::path::FieldPath;
use crate::schema::{expect_record, FieldValidator, SchemaDefinition};

/// The outcome of validating one record.
///
/// Holds at most one error per field path, keyed by the path's dot notation
/// (`projects.0.projectName`). A path that is missing from the result either
/// passed or was not applicable for this record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationResult {
    errors: IndexMap<String, FieldError>,
}

impl ValidationResult {
    /// Creates a result with no errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error unless its path already has one.
    ///
    /// Returns true if the error was recorded.
    pub fn insert(&mut self, error: FieldError) -> bool {
        match self.errors.entry(error.path.to_string()) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(error);
                true
            }
        }
    }

    /// Returns true if no field failed.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of failing paths.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if no field failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the error recorded at `path`.
    ///
    /// The path may be given in dot or bracket notation.
    pub fn error(&self, path: &str) -> Option<&FieldError> {
        self.errors.get(path).or_else(|| {
            let normalized = FieldPath::parse(path).to_string();
            self.errors.get(&normalized)
        })
    }

    /// Returns the message recorded at `path`.
    pub fn message(&self, path: &str) -> Option<&str> {
        self.error(path).map(|e| e.message.as_str())
    }

    /// Returns the error kind recorded at `path`.
    pub fn kind(&self, path: &str) -> Option<ErrorKind> {
        self.error(path).map(|e| e.kind)
    }

    /// Iterates over `(path, error)` pairs in the order they were reported.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldError)> {
        self.errors.iter().map(|(path, error)| (path.as_str(), error))
    }

    /// Returns the failing paths in the order they were reported.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// Consumes the result, returning the errors keyed by path.
    pub fn into_errors(self) -> IndexMap<String, FieldError> {
        self.errors
    }

    /// Renders the errors as a `{ path: message }` JSON object.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fieldguard::Schema;
    /// use serde_json::json;
    ///
    /// let schema = Schema::definition()
    ///     .field("dob", Schema::string().required().error("DOB is required"));
    ///
    /// let result = schema.validate(&json!({}));
    /// assert_eq!(result.to_json(), json!({"dob": "DOB is required"}));
    /// ```
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .errors
            .iter()
            .map(|(path, error)| (path.clone(), Value::String(error.message.clone())))
            .collect();
        Value::Object(map)
    }

    /// Converts the result into a `Validation` for composition with other
    /// validations.
    pub fn into_validation(self) -> Validation<(), FieldErrors> {
        match FieldErrors::from_vec(self.errors.into_values().collect()) {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(()),
        }
    }
}

impl From<FieldErrors> for ValidationResult {
    fn from(errors: FieldErrors) -> Self {
        let mut result = Self::new();
        for error in errors {
            result.insert(error);
        }
        result
    }
}

/// Options controlling a validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Stop after the first top-level field that reports an error.
    pub fail_fast: bool,
}

/// Orchestrates full-record validation passes.
///
/// A validator holds only its options; it is cheap to create and safe to share.
/// Each call is a pure function of `(record, schema)`.
///
/// # Example
///
/// ```rust
/// use fieldguard::{Schema, Validator};
/// use serde_json::json;
///
/// let schema = Schema::definition()
///     .field("firstName", Schema::string().required())
///     .field("lastName", Schema::string().required());
///
/// let result = Validator::new().validate(&json!({}), &schema);
/// assert_eq!(result.len(), 2);
///
/// let result = Validator::new().fail_fast(true).validate(&json!({}), &schema);
/// assert_eq!(result.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    options: ValidatorOptions,
}

impl Validator {
    /// Creates a validator with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator with the given options.
    pub fn with_options(options: ValidatorOptions) -> Self {
        Self { options }
    }

    /// Sets whether validation stops after the first failing field.
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.options.fail_fast = fail_fast;
        self
    }

    /// Returns the active options.
    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Validates one record against a schema.
    ///
    /// Fields are visited in declaration order. Conditional fields are
    /// resolved against this record, array fields validate every item, and
    /// each path keeps only its first error. A record that is not a JSON
    /// object yields a single type mismatch at the root path.
    pub fn validate(&self, record: &Value, schema: &SchemaDefinition) -> ValidationResult {
        let mut result = ValidationResult::new();
        let root = FieldPath::root();

        if let Err(err) = expect_record(record, &root) {
            result.insert(err);
            debug!("record is not an object");
            return result;
        }

        for (path, rule) in schema.iter() {
            if let Validation::Failure(errors) = rule.validate_field(path.lookup(record), record, path)
            {
                for error in errors {
                    result.insert(error);
                }
                if self.options.fail_fast {
                    break;
                }
            }
        }

        debug!(
            fields = schema.len(),
            failed = result.len(),
            "validated record"
        );
        result
    }

    /// Validates many records against one schema in parallel.
    ///
    /// Results are returned in input order.
    pub fn validate_batch(
        &self,
        records: &[Value],
        schema: &SchemaDefinition,
    ) -> Vec<ValidationResult> {
        records
            .par_iter()
            .map(|record| self.validate(record, schema))
            .collect()
    }
}
