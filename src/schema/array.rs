//! Array field validation.
//!
//! This module provides [`ArrayFieldSpec`] for sequence fields whose every item
//! must satisfy an item schema, plus aggregate length constraints.

use indexmap::IndexMap;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{ErrorKind, FieldError, FieldErrors};
use crate::path::FieldPath;

use super::definition::SchemaDefinition;
use super::field::FieldSpec;
use super::rule::{value_type_name, Rule};
use super::traits::FieldValidator;

/// The schema every item of an array field must satisfy.
#[derive(Debug, Clone)]
pub enum ItemSchema {
    /// Each item is a single value; errors land at `path.N`.
    Field(FieldSpec),
    /// Each item is a nested record; errors land at `path.N.child`.
    Record(SchemaDefinition),
}

impl From<FieldSpec> for ItemSchema {
    fn from(spec: FieldSpec) -> Self {
        ItemSchema::Field(spec)
    }
}

impl From<SchemaDefinition> for ItemSchema {
    fn from(definition: SchemaDefinition) -> Self {
        ItemSchema::Record(definition)
    }
}

/// A length constraint applied to the whole sequence.
#[derive(Debug, Clone)]
enum ArrayConstraint {
    MinItems {
        min: usize,
        message: Option<String>,
    },
    MaxItems {
        max: usize,
        message: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastAdded {
    Type,
    Required,
    Constraint,
}

/// A schema for sequence fields.
///
/// Length constraints and per-item validation run independently: a sequence
/// that is too short still has every present item validated, so all errors
/// surface in one pass. An empty sequence produces only the length error.
///
/// # Example
///
/// ```rust
/// use fieldguard::{FieldValidator, FieldPath, Schema};
/// use serde_json::json;
///
/// let projects = Schema::array(
///     Schema::definition()
///         .field("projectName", Schema::string().required().error("Project Name is required")),
/// )
/// .min_items(1)
/// .error("At least one project is required");
///
/// let path = FieldPath::from_field("projects");
///
/// let errors = projects
///     .validate_field(Some(&json!([])), &json!({}), &path)
///     .into_result()
///     .unwrap_err();
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors.first().message, "At least one project is required");
///
/// let errors = projects
///     .validate_field(Some(&json!([{"projectName": ""}])), &json!({}), &path)
///     .into_result()
///     .unwrap_err();
/// assert_eq!(errors.first().path.to_string(), "projects.0.projectName");
/// ```
#[derive(Debug, Clone)]
pub struct ArrayFieldSpec {
    items: ItemSchema,
    required: Option<Rule>,
    constraints: Vec<ArrayConstraint>,
    type_error_message: Option<String>,
    last: LastAdded,
}

impl ArrayFieldSpec {
    /// Creates an optional array field with the given item schema.
    pub fn new(items: impl Into<ItemSchema>) -> Self {
        Self {
            items: items.into(),
            required: None,
            constraints: Vec::new(),
            type_error_message: None,
            last: LastAdded::Type,
        }
    }

    /// Marks the field as required. An empty sequence counts as missing.
    pub fn required(mut self) -> Self {
        if self.required.is_none() {
            self.required = Some(Rule::required());
        }
        self.last = LastAdded::Required;
        self
    }

    /// Requires at least `min` items, reported as `TooFewItems`.
    pub fn min_items(mut self, min: usize) -> Self {
        self.constraints
            .push(ArrayConstraint::MinItems { min, message: None });
        self.last = LastAdded::Constraint;
        self
    }

    /// Allows at most `max` items, reported as `OutOfRange`.
    pub fn max_items(mut self, max: usize) -> Self {
        self.constraints
            .push(ArrayConstraint::MaxItems { max, message: None });
        self.last = LastAdded::Constraint;
        self
    }

    /// Equivalent to `.min_items(1)`.
    pub fn non_empty(self) -> Self {
        self.min_items(1)
    }

    /// Sets the error message for the most recently added constraint.
    ///
    /// Called right after construction it sets the type mismatch message;
    /// after `.required()` it sets the missing-value message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        match self.last {
            LastAdded::Type => self.type_error_message = Some(message),
            LastAdded::Required => {
                if let Some(rule) = self.required.as_mut() {
                    rule.set_message(message);
                }
            }
            LastAdded::Constraint => match self.constraints.last_mut() {
                Some(ArrayConstraint::MinItems { message: m, .. })
                | Some(ArrayConstraint::MaxItems { message: m, .. }) => *m = Some(message),
                None => {}
            },
        }
        self
    }

    /// Returns the item schema.
    pub fn items(&self) -> &ItemSchema {
        &self.items
    }

    /// Returns true if the field has a required check.
    pub fn is_required(&self) -> bool {
        self.required.is_some()
    }

    /// Validates each item against the item schema.
    ///
    /// Returns the errors of every failing item keyed by index; passing items
    /// are absent from the map. `record` is the record holding the array.
    pub fn validate_items(
        &self,
        items: &[Value],
        record: &Value,
        path: &FieldPath,
    ) -> IndexMap<usize, FieldErrors> {
        let mut failures = IndexMap::new();

        for (index, item) in items.iter().enumerate() {
            let item_path = path.push_index(index);
            let outcome = match &self.items {
                ItemSchema::Field(spec) => spec.validate_field(Some(item), record, &item_path),
                ItemSchema::Record(definition) => definition.validate_record(item, &item_path),
            };
            if let Validation::Failure(errors) = outcome {
                failures.insert(index, errors);
            }
        }

        failures
    }

    fn check_length(&self, len: usize, path: &FieldPath) -> Vec<FieldError> {
        let mut errors = Vec::new();

        for constraint in &self.constraints {
            match constraint {
                ArrayConstraint::MinItems { min, message } if len < *min => {
                    let msg = message.clone().unwrap_or_else(|| {
                        format!("must have at least {} items, got {}", min, len)
                    });
                    errors.push(
                        FieldError::new(path.clone(), ErrorKind::TooFewItems, msg)
                            .with_expected(format!("at least {} items", min))
                            .with_got(format!("{} items", len)),
                    );
                }
                ArrayConstraint::MaxItems { max, message } if len > *max => {
                    let msg = message.clone().unwrap_or_else(|| {
                        format!("must have at most {} items, got {}", max, len)
                    });
                    errors.push(
                        FieldError::new(path.clone(), ErrorKind::OutOfRange, msg)
                            .with_code("max_items")
                            .with_expected(format!("at most {} items", max))
                            .with_got(format!("{} items", len)),
                    );
                }
                _ => {}
            }
        }

        errors
    }
}

impl FieldValidator for ArrayFieldSpec {
    fn validate_field(
        &self,
        value: Option<&Value>,
        record: &Value,
        path: &FieldPath,
    ) -> Validation<(), FieldErrors> {
        let present = value.filter(|v| !v.is_null());

        if let Some(required) = &self.required {
            if let Err(err) = required.apply(present, record, path) {
                return Validation::Failure(FieldErrors::single(err));
            }
        }

        let Some(value) = present else {
            return Validation::Success(());
        };

        let Some(items) = value.as_array() else {
            let message = self
                .type_error_message
                .clone()
                .unwrap_or_else(|| format!("expected sequence, got {}", value_type_name(value)));
            return Validation::Failure(FieldErrors::single(
                FieldError::new(path.clone(), ErrorKind::TypeMismatch, message)
                    .with_expected("sequence")
                    .with_got(value_type_name(value)),
            ));
        };

        let mut errors = self.check_length(items.len(), path);
        for (_, item_errors) in self.validate_items(items, record, path) {
            errors.extend(item_errors);
        }

        match FieldErrors::from_vec(errors) {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(()),
        }
    }
}
