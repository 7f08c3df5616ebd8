//! Field-level validation error types.
//!
//! This module provides [`FieldError`] for a single failed rule, [`ErrorKind`]
//! for classifying it, and [`FieldErrors`] for accumulating errors across fields.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::FieldPath;

/// The kind of constraint a field violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The field is absent or empty where a value is required.
    MissingRequired,
    /// The value's shape does not match the field's declared kind.
    TypeMismatch,
    /// A pattern, email, URL or predicate check failed.
    FormatInvalid,
    /// A numeric bound or length bound was violated.
    OutOfRange,
    /// A sequence has fewer items than its minimum.
    TooFewItems,
    /// The value is not one of the accepted values.
    NotAccepted,
}

impl ErrorKind {
    /// Returns the default machine-readable code for this kind.
    pub fn default_code(&self) -> &'static str {
        match self {
            ErrorKind::MissingRequired => "required",
            ErrorKind::TypeMismatch => "invalid_type",
            ErrorKind::FormatInvalid => "format",
            ErrorKind::OutOfRange => "out_of_range",
            ErrorKind::TooFewItems => "too_few_items",
            ErrorKind::NotAccepted => "not_accepted",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::MissingRequired => "missing required",
            ErrorKind::TypeMismatch => "type mismatch",
            ErrorKind::FormatInvalid => "invalid format",
            ErrorKind::OutOfRange => "out of range",
            ErrorKind::TooFewItems => "too few items",
            ErrorKind::NotAccepted => "not accepted",
        };
        f.write_str(name)
    }
}

/// A single validation failure for one field path.
///
/// `FieldError` captures:
/// - **path**: Where in the record the failure occurred
/// - **kind**: Which class of constraint failed
/// - **message**: The message a caller shows next to the input
/// - **code**: Machine-readable code of the specific rule (e.g. `pattern`)
/// - **got** / **expected**: Optional context for diagnostics
///
/// # Example
///
/// ```rust
/// use fieldguard::{ErrorKind, FieldError, FieldPath};
///
/// let error = FieldError::new(
///     FieldPath::from_field("mobileNumber"),
///     ErrorKind::FormatInvalid,
///     "Invalid mobile number",
/// )
/// .with_code("pattern")
/// .with_got("12345");
///
/// assert_eq!(error.code, "pattern");
/// assert_eq!(error.to_string(), "mobileNumber: Invalid mobile number (got: 12345)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// The path to the value that failed validation.
    pub path: FieldPath,
    /// The class of constraint that failed.
    pub kind: ErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// The actual value that was received (formatted as string).
    pub got: Option<String>,
    /// Description of what was expected.
    pub expected: Option<String>,
    /// Machine-readable error code.
    pub code: String,
}

impl FieldError {
    /// Creates a new field error. The code defaults to the kind's default code.
    pub fn new(path: FieldPath, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
            got: None,
            expected: None,
            code: kind.default_code().to_string(),
        }
    }

    /// Sets the error code and returns self for chaining.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the "got" (actual value) field and returns self for chaining.
    pub fn with_got(mut self, got: impl Into<String>) -> Self {
        self.got = Some(got.into());
        self
    }

    /// Sets the "expected" field and returns self for chaining.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path_str = if self.path.is_root() {
            "(root)".to_string()
        } else {
            self.path.to_string()
        };

        write!(f, "{}: {}", path_str, self.message)?;

        if let Some(ref expected) = self.expected {
            write!(f, " (expected: {})", expected)?;
        }
        if let Some(ref got) = self.got {
            write!(f, " (got: {})", got)?;
        }

        Ok(())
    }
}

impl std::error::Error for FieldError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<FieldError>();
    assert_sync::<FieldError>();
};

/// A non-empty collection of field errors.
///
/// `FieldErrors` wraps a `NonEmptyVec<FieldError>` so that a
/// `Validation<T, FieldErrors>` failure always carries at least one error.
/// It implements `Semigroup`, so errors from separate fields combine:
///
/// ```rust
/// use fieldguard::{ErrorKind, FieldError, FieldErrors, FieldPath};
/// use stillwater::prelude::*;
///
/// let first = FieldErrors::single(FieldError::new(
///     FieldPath::from_field("firstName"),
///     ErrorKind::MissingRequired,
///     "First Name is required",
/// ));
/// let second = FieldErrors::single(FieldError::new(
///     FieldPath::from_field("email"),
///     ErrorKind::FormatInvalid,
///     "Invalid email",
/// ));
///
/// assert_eq!(first.combine(second).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldErrors(NonEmptyVec<FieldError>);

impl FieldErrors {
    /// Creates a `FieldErrors` containing a single error.
    pub fn single(error: FieldError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a `FieldErrors` from a `Vec`, or `None` if it is empty.
    pub fn from_vec(errors: Vec<FieldError>) -> Option<Self> {
        errors
            .into_iter()
            .map(Self::single)
            .reduce(|acc, next| acc.combine(next))
    }

    /// Returns the number of errors in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is guaranteed non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained errors.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Returns all errors at the specified path.
    pub fn at_path(&self, path: &FieldPath) -> Vec<&FieldError> {
        self.0.iter().filter(|e| &e.path == path).collect()
    }

    /// Returns all errors of the specified kind.
    pub fn of_kind(&self, kind: ErrorKind) -> Vec<&FieldError> {
        self.0.iter().filter(|e| e.kind == kind).collect()
    }

    /// Returns all errors with the specified error code.
    pub fn with_code(&self, code: &str) -> Vec<&FieldError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    /// Returns the first error in the collection.
    pub fn first(&self) -> &FieldError {
        self.0.head()
    }

    /// Converts this collection into a `Vec<FieldError>`.
    pub fn into_vec(self) -> Vec<FieldError> {
        self.0.into_vec()
    }
}

impl Semigroup for FieldErrors {
    fn combine(self, other: Self) -> Self {
        FieldErrors(self.0.combine(other.0))
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = Box<dyn Iterator<Item = &'a FieldError> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<FieldErrors>();
    assert_sync::<FieldErrors>();
};
