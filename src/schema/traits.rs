//! Traits for field-level validation polymorphism.
//!
//! This module provides the [`FieldValidator`] trait that lets plain fields,
//! array fields and conditional fields sit side by side in a
//! [`SchemaDefinition`](super::SchemaDefinition).

use serde_json::Value;
use stillwater::Validation;

use crate::error::FieldErrors;
use crate::path::FieldPath;

/// A validator for one field of a record.
///
/// `value` is the field's current value (`None` when absent) and `record` is
/// the record the field belongs to, which conditional and predicate rules
/// consult. Implementations never mutate either and never panic on unexpected
/// shapes; a wrong shape is reported as a type mismatch.
///
/// The `Send + Sync` bounds allow a schema to be shared by concurrent
/// validation calls.
pub trait FieldValidator: Send + Sync {
    /// Validates a single field, accumulating every error it produces.
    fn validate_field(
        &self,
        value: Option<&Value>,
        record: &Value,
        path: &FieldPath,
    ) -> Validation<(), FieldErrors>;
}
