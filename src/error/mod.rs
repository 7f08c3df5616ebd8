//! Error types for validation and schema construction failures.
//!
//! Validation failures are data: [`FieldError`] values accumulated into
//! [`FieldErrors`]. Failures while building a schema are reported through
//! [`SchemaBuildError`].

mod build_error;
mod field_error;

pub use build_error::SchemaBuildError;
pub use field_error::{ErrorKind, FieldError, FieldErrors};
