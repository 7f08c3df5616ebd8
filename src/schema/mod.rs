//! Schema definitions for record validation.
//!
//! This module provides the schema authoring surface: [`Rule`]s chained into
//! [`FieldSpec`]s, [`ArrayFieldSpec`]s for sequences, [`ConditionalSpec`]s for
//! fields governed by a sibling's value, and the [`SchemaDefinition`] that maps
//! field paths to all of these.
//!
//! # Example
//!
//! ```rust
//! use fieldguard::Schema;
//! use serde_json::json;
//!
//! let schema = Schema::definition()
//!     .field(
//!         "experience",
//!         Schema::number().range(0.0, 10.0).unwrap().required(),
//!     );
//!
//! assert!(schema.validate(&json!({"experience": 10})).is_ok());
//! assert!(!schema.validate(&json!({"experience": 11})).is_ok());
//! ```

mod array;
mod conditional;
mod definition;
mod field;
mod rule;
mod traits;

pub use array::{ArrayFieldSpec, ItemSchema};
pub use conditional::{Branch, ConditionalSpec, Resolution};
pub use definition::{FieldRule, SchemaDefinition};
pub use field::FieldSpec;
pub use rule::{PredicateFn, Rule, ValueKind};
pub use traits::FieldValidator;

pub(crate) use definition::expect_record;

/// Entry point for creating validation schemas.
///
/// `Schema` provides factory methods for each field kind, for array and
/// conditional fields, and for the definition that ties them together.
///
/// # Example
///
/// ```rust
/// use fieldguard::Schema;
///
/// let email = Schema::string()
///     .email()
///     .error("Invalid email")
///     .required()
///     .error("Email is required");
///
/// let file = Schema::conditional("cvType").when(
///     "offline",
///     Schema::file()
///         .required()
///         .accepted_mime_types(["application/pdf"], "Invalid file format"),
/// );
/// ```
pub struct Schema;

impl Schema {
    /// Creates a field that must be a string.
    pub fn string() -> FieldSpec {
        FieldSpec::new(ValueKind::String)
    }

    /// Creates a field that must be a number.
    pub fn number() -> FieldSpec {
        FieldSpec::new(ValueKind::Number)
    }

    /// Creates a field that must be a number without a fractional part.
    pub fn integer() -> FieldSpec {
        FieldSpec::new(ValueKind::Integer)
    }

    /// Creates a field that must be a boolean.
    pub fn boolean() -> FieldSpec {
        FieldSpec::new(ValueKind::Boolean)
    }

    /// Creates a field that must be a sequence, with no item checks.
    ///
    /// Use [`Schema::array`] to validate items.
    pub fn sequence() -> FieldSpec {
        FieldSpec::new(ValueKind::Sequence)
    }

    /// Creates a field that must be a nested record.
    pub fn record() -> FieldSpec {
        FieldSpec::new(ValueKind::Record)
    }

    /// Creates a field that must be a file descriptor.
    pub fn file() -> FieldSpec {
        FieldSpec::new(ValueKind::File)
    }

    /// Creates a field with no shape check.
    pub fn any() -> FieldSpec {
        FieldSpec::new(ValueKind::Any)
    }

    /// Creates an array field whose items satisfy `items`.
    ///
    /// `items` is a [`FieldSpec`] for scalar items or a [`SchemaDefinition`]
    /// for record items.
    pub fn array(items: impl Into<ItemSchema>) -> ArrayFieldSpec {
        ArrayFieldSpec::new(items)
    }

    /// Creates a conditional field keyed on `discriminator`.
    pub fn conditional(discriminator: &str) -> ConditionalSpec {
        ConditionalSpec::on(discriminator)
    }

    /// Creates an empty schema definition.
    pub fn definition() -> SchemaDefinition {
        SchemaDefinition::new()
    }
}
