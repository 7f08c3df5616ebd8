//! Schema definitions: ordered mappings from field path to field rule.

use indexmap::IndexMap;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{ErrorKind, FieldError, FieldErrors};
use crate::path::FieldPath;
use crate::validation::{ValidationResult, Validator};

use super::array::ArrayFieldSpec;
use super::conditional::ConditionalSpec;
use super::field::FieldSpec;
use super::rule::value_type_name;
use super::traits::FieldValidator;

/// The validation attached to one field path.
#[derive(Debug, Clone)]
pub enum FieldRule {
    Field(FieldSpec),
    Array(ArrayFieldSpec),
    Conditional(ConditionalSpec),
}

impl From<FieldSpec> for FieldRule {
    fn from(spec: FieldSpec) -> Self {
        FieldRule::Field(spec)
    }
}

impl From<ArrayFieldSpec> for FieldRule {
    fn from(spec: ArrayFieldSpec) -> Self {
        FieldRule::Array(spec)
    }
}

impl From<ConditionalSpec> for FieldRule {
    fn from(spec: ConditionalSpec) -> Self {
        FieldRule::Conditional(spec)
    }
}

impl FieldValidator for FieldRule {
    fn validate_field(
        &self,
        value: Option<&Value>,
        record: &Value,
        path: &FieldPath,
    ) -> Validation<(), FieldErrors> {
        match self {
            FieldRule::Field(spec) => spec.validate_field(value, record, path),
            FieldRule::Array(spec) => spec.validate_field(value, record, path),
            FieldRule::Conditional(spec) => spec.validate_field(value, record, path),
        }
    }
}

/// A single entry of a [`SchemaDefinition`].
#[derive(Debug, Clone)]
struct Entry {
    path: FieldPath,
    rule: FieldRule,
}

/// An ordered mapping from field path to [`FieldRule`].
///
/// A definition is built once and then only read: it holds no reference to
/// the records it validates and is `Send + Sync`, so one instance can serve
/// any number of concurrent validation calls.
///
/// Fields are validated in declaration order. Declaring a path again replaces
/// the earlier rule in place.
///
/// # Example
///
/// ```rust
/// use fieldguard::Schema;
/// use serde_json::json;
///
/// let schema = Schema::definition()
///     .field("firstName", Schema::string().required().error("First Name is required"))
///     .field("cvType", Schema::string().required())
///     .field(
///         "websiteLink",
///         Schema::conditional("cvType").when("online", Schema::string().required()),
///     );
///
/// let result = schema.validate(&json!({"cvType": "online"}));
/// assert!(!result.is_ok());
/// assert_eq!(result.message("firstName"), Some("First Name is required"));
/// assert!(result.error("websiteLink").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaDefinition {
    fields: IndexMap<String, Entry>,
}

impl SchemaDefinition {
    /// Creates an empty definition.
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    /// Declares the rule for a field path.
    ///
    /// Accepts a [`FieldSpec`], [`ArrayFieldSpec`] or [`ConditionalSpec`].
    /// Paths may be nested (`address.city`).
    pub fn field(mut self, path: impl Into<FieldPath>, rule: impl Into<FieldRule>) -> Self {
        let path = path.into();
        let entry = Entry {
            path: path.clone(),
            rule: rule.into(),
        };
        self.fields.insert(path.to_string(), entry);
        self
    }

    /// Returns the rule declared for `path`.
    pub fn get(&self, path: &str) -> Option<&FieldRule> {
        self.fields
            .get(&FieldPath::parse(path).to_string())
            .map(|entry| &entry.rule)
    }

    /// Iterates over declared paths and their rules in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &FieldRule)> {
        self.fields.values().map(|entry| (&entry.path, &entry.rule))
    }

    /// Returns the number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validates a record with a default [`Validator`].
    pub fn validate(&self, record: &Value) -> ValidationResult {
        Validator::new().validate(record, self)
    }

    /// Validates `record` as a nested record located at `base`, accumulating
    /// every field's errors.
    ///
    /// A non-record value is a single type mismatch at `base`.
    pub fn validate_record(&self, record: &Value, base: &FieldPath) -> Validation<(), FieldErrors> {
        if let Err(err) = expect_record(record, base) {
            return Validation::Failure(FieldErrors::single(err));
        }

        let errors: Vec<FieldError> = self
            .iter()
            .filter_map(|(path, rule)| {
                match rule.validate_field(path.lookup(record), record, &base.join(path)) {
                    Validation::Success(()) => None,
                    Validation::Failure(errors) => Some(errors),
                }
            })
            .flatten()
            .collect();

        match FieldErrors::from_vec(errors) {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(()),
        }
    }
}

/// Reports a type mismatch unless `record` is a JSON object.
pub(crate) fn expect_record(record: &Value, path: &FieldPath) -> Result<(), FieldError> {
    if record.is_object() {
        return Ok(());
    }
    Err(FieldError::new(
        path.clone(),
        ErrorKind::TypeMismatch,
        format!("expected record, got {}", value_type_name(record)),
    )
    .with_expected("record")
    .with_got(value_type_name(record)))
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaDefinition>();
    assert_sync::<SchemaDefinition>();
};
