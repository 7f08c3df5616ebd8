//! Atomic validation rules.
//!
//! A [`Rule`] is a pure check of one value, optionally consulting the enclosing
//! record. Rules are chained in a [`FieldSpec`](super::FieldSpec) and evaluated
//! left to right; the first failure is the field's only reported error.

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde_json::Value;
use tracing::trace;

use crate::error::{ErrorKind, FieldError, SchemaBuildError};
use crate::file::FileDescriptor;
use crate::path::FieldPath;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(https?|ftp)://[^\s/$.?#][^\s]*$").expect("url pattern is valid")
});

/// The runtime shape a field value is expected to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// No shape check.
    Any,
    String,
    /// Any JSON number, integer or float.
    Number,
    /// A number without a fractional part.
    Integer,
    Boolean,
    Sequence,
    /// A nested record (JSON object).
    Record,
    /// A [`FileDescriptor`] or a non-empty list of them.
    File,
}

impl ValueKind {
    /// Returns the name used in type mismatch messages.
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Any => "any",
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Integer => "integer",
            ValueKind::Boolean => "boolean",
            ValueKind::Sequence => "sequence",
            ValueKind::Record => "record",
            ValueKind::File => "file",
        }
    }

    /// Returns true if `value` has this shape.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ValueKind::Any => true,
            ValueKind::String => value.is_string(),
            ValueKind::Number => value.is_number(),
            ValueKind::Integer => match value {
                Value::Number(n) if n.is_i64() || n.is_u64() => true,
                Value::Number(n) => n.as_f64().is_some_and(|f| f.fract() == 0.0),
                _ => false,
            },
            ValueKind::Boolean => value.is_boolean(),
            ValueKind::Sequence => value.is_array(),
            ValueKind::Record => value.is_object(),
            ValueKind::File => FileDescriptor::from_value(value).is_some(),
        }
    }
}

/// A predicate over `(value, record)` used by custom rules.
pub type PredicateFn = Arc<dyn Fn(&Value, &Value) -> bool + Send + Sync>;

/// A single constraint in a field's rule chain.
///
/// Every rule except [`Rule::Required`] passes when the value is absent;
/// absence is the required rule's concern alone.
#[derive(Clone)]
pub enum Rule {
    /// Fails on absent, null, empty string or empty sequence.
    Required { message: Option<String> },
    /// Fails if the value does not have the given shape.
    TypeMatch {
        kind: ValueKind,
        message: Option<String>,
    },
    /// Fails if a string does not fully match the pattern.
    Pattern {
        regex: Regex,
        pattern: String,
        message: Option<String>,
    },
    Email { message: Option<String> },
    Url { message: Option<String> },
    /// Inclusive lower numeric bound.
    Min { min: f64, message: Option<String> },
    /// Inclusive upper numeric bound.
    Max { max: f64, message: Option<String> },
    /// Inclusive numeric range.
    Range {
        min: f64,
        max: f64,
        message: Option<String>,
    },
    /// Minimum length of a string (in UTF-16 code units, as a browser counts
    /// it) or a sequence.
    MinLength { min: usize, message: Option<String> },
    /// Maximum length of a string (in UTF-16 code units, as a browser counts
    /// it) or a sequence.
    MaxLength { max: usize, message: Option<String> },
    /// Fails unless the value equals one of `allowed`.
    OneOf {
        allowed: Vec<Value>,
        message: Option<String>,
    },
    /// Escape hatch for checks the other rules cannot express.
    Predicate {
        name: String,
        kind: ErrorKind,
        test: PredicateFn,
        message: String,
    },
}

impl Rule {
    pub fn required() -> Self {
        Rule::Required { message: None }
    }

    pub fn type_match(kind: ValueKind) -> Self {
        Rule::TypeMatch {
            kind,
            message: None,
        }
    }

    /// Creates a full-match pattern rule.
    ///
    /// The pattern is anchored as `^(?:pattern)$`, so `\d{10}` accepts exactly
    /// ten digits and nothing around them.
    ///
    /// # Errors
    ///
    /// Returns `SchemaBuildError::InvalidPattern` if the regex does not compile.
    pub fn pattern(pattern: &str) -> Result<Self, SchemaBuildError> {
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| {
            SchemaBuildError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        Ok(Rule::Pattern {
            regex,
            pattern: pattern.to_string(),
            message: None,
        })
    }

    pub fn email() -> Self {
        Rule::Email { message: None }
    }

    pub fn url() -> Self {
        Rule::Url { message: None }
    }

    /// Creates an inclusive lower bound. A NaN bound rejects every value;
    /// use [`Rule::range`] to have bounds checked at build time.
    pub fn min(min: f64) -> Self {
        Rule::Min { min, message: None }
    }

    /// Creates an inclusive upper bound. A NaN bound rejects every value;
    /// use [`Rule::range`] to have bounds checked at build time.
    pub fn max(max: f64) -> Self {
        Rule::Max { max, message: None }
    }

    /// Creates an inclusive range rule.
    ///
    /// # Errors
    ///
    /// Returns `SchemaBuildError::InvalidRange` if either bound is not finite
    /// or `min > max`.
    pub fn range(min: f64, max: f64) -> Result<Self, SchemaBuildError> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(SchemaBuildError::InvalidRange { min, max });
        }
        Ok(Rule::Range {
            min,
            max,
            message: None,
        })
    }

    pub fn min_length(min: usize) -> Self {
        Rule::MinLength { min, message: None }
    }

    pub fn max_length(max: usize) -> Self {
        Rule::MaxLength { max, message: None }
    }

    pub fn one_of<I, V>(allowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Rule::OneOf {
            allowed: allowed.into_iter().map(Into::into).collect(),
            message: None,
        }
    }

    /// Creates a custom rule reporting `FormatInvalid` on failure.
    ///
    /// The predicate receives the field value and the enclosing record. `name`
    /// becomes the error code.
    pub fn predicate<F>(name: impl Into<String>, message: impl Into<String>, test: F) -> Self
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        Self::custom(ErrorKind::FormatInvalid, name, message, test)
    }

    /// Creates a custom rule reporting the given kind on failure.
    pub fn custom<F>(
        kind: ErrorKind,
        name: impl Into<String>,
        message: impl Into<String>,
        test: F,
    ) -> Self
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        Rule::Predicate {
            name: name.into(),
            kind,
            test: Arc::new(test),
            message: message.into(),
        }
    }

    /// Creates a predicate accepting only files whose declared MIME type is
    /// in `mime_types`. Non-file values fail the predicate.
    pub fn accepted_mime_types<I, S>(mime_types: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let accepted: Vec<String> = mime_types.into_iter().map(Into::into).collect();
        Self::predicate("mime_type", message, move |value, _record| {
            FileDescriptor::from_value(value)
                .is_some_and(|file| accepted.iter().any(|mime| *mime == file.mime))
        })
    }

    /// Returns a copy of this rule with its message replaced.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.set_message(message);
        self
    }

    /// Replaces the message reported when this rule fails.
    pub fn set_message(&mut self, message: impl Into<String>) {
        let message = message.into();
        match self {
            Rule::Required { message: m }
            | Rule::TypeMatch { message: m, .. }
            | Rule::Pattern { message: m, .. }
            | Rule::Email { message: m }
            | Rule::Url { message: m }
            | Rule::Min { message: m, .. }
            | Rule::Max { message: m, .. }
            | Rule::Range { message: m, .. }
            | Rule::MinLength { message: m, .. }
            | Rule::MaxLength { message: m, .. }
            | Rule::OneOf { message: m, .. } => *m = Some(message),
            Rule::Predicate { message: m, .. } => *m = message,
        }
    }

    /// Returns the kind of error this rule reports.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Rule::Required { .. } => ErrorKind::MissingRequired,
            Rule::TypeMatch { .. } => ErrorKind::TypeMismatch,
            Rule::Pattern { .. } | Rule::Email { .. } | Rule::Url { .. } => {
                ErrorKind::FormatInvalid
            }
            Rule::Min { .. }
            | Rule::Max { .. }
            | Rule::Range { .. }
            | Rule::MinLength { .. }
            | Rule::MaxLength { .. } => ErrorKind::OutOfRange,
            Rule::OneOf { .. } => ErrorKind::NotAccepted,
            Rule::Predicate { kind, .. } => *kind,
        }
    }

    /// Applies the rule to a field value.
    ///
    /// `value` is `None` when the field is absent from the record. `record` is
    /// the record the field belongs to, for rules that consult siblings.
    pub fn apply(
        &self,
        value: Option<&Value>,
        record: &Value,
        path: &FieldPath,
    ) -> Result<(), FieldError> {
        let outcome = self.check(value, record, path);
        if let Err(err) = &outcome {
            trace!(path = %path, code = %err.code, "rule failed");
        }
        outcome
    }

    fn check(
        &self,
        value: Option<&Value>,
        record: &Value,
        path: &FieldPath,
    ) -> Result<(), FieldError> {
        if let Rule::Required { message } = self {
            if is_blank(value) {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("{} is required", subject(path)));
                return Err(FieldError::new(path.clone(), ErrorKind::MissingRequired, msg)
                    .with_expected("value"));
            }
            return Ok(());
        }

        let Some(value) = value.filter(|v| !v.is_null()) else {
            return Ok(());
        };

        match self {
            Rule::Required { .. } => Ok(()),
            Rule::TypeMatch { kind, message } => {
                if kind.matches(value) {
                    return Ok(());
                }
                let msg = message.clone().unwrap_or_else(|| {
                    format!("expected {}, got {}", kind.name(), value_type_name(value))
                });
                Err(FieldError::new(path.clone(), ErrorKind::TypeMismatch, msg)
                    .with_expected(kind.name())
                    .with_got(value_type_name(value)))
            }
            Rule::Pattern {
                regex,
                pattern,
                message,
            } => {
                let s = expect_str(value, path)?;
                if regex.is_match(s) {
                    return Ok(());
                }
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("must match pattern '{}'", pattern));
                Err(self.fail(path, msg, "pattern")
                    .with_expected(format!("string matching '{}'", pattern))
                    .with_got(s))
            }
            Rule::Email { message } => {
                let s = expect_str(value, path)?;
                if EMAIL_REGEX.is_match(s) {
                    return Ok(());
                }
                let msg = message
                    .clone()
                    .unwrap_or_else(|| "must be a valid email address".to_string());
                Err(self.fail(path, msg, "email").with_got(s))
            }
            Rule::Url { message } => {
                let s = expect_str(value, path)?;
                if URL_REGEX.is_match(s) {
                    return Ok(());
                }
                let msg = message
                    .clone()
                    .unwrap_or_else(|| "must be a valid URL".to_string());
                Err(self.fail(path, msg, "url").with_got(s))
            }
            Rule::Min { min, message } => {
                let n = expect_number(value, path)?;
                if n >= *min {
                    return Ok(());
                }
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("must be at least {}, got {}", min, n));
                Err(self.fail(path, msg, "min_value")
                    .with_expected(format!("at least {}", min))
                    .with_got(n.to_string()))
            }
            Rule::Max { max, message } => {
                let n = expect_number(value, path)?;
                if n <= *max {
                    return Ok(());
                }
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("must be at most {}, got {}", max, n));
                Err(self.fail(path, msg, "max_value")
                    .with_expected(format!("at most {}", max))
                    .with_got(n.to_string()))
            }
            Rule::Range { min, max, message } => {
                let n = expect_number(value, path)?;
                if n >= *min && n <= *max {
                    return Ok(());
                }
                let code = if n < *min { "min_value" } else { "max_value" };
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("must be between {} and {}, got {}", min, max, n));
                Err(self.fail(path, msg, code)
                    .with_expected(format!("between {} and {}", min, max))
                    .with_got(n.to_string()))
            }
            Rule::MinLength { min, message } => {
                let len = expect_length(value, path)?;
                if len >= *min {
                    return Ok(());
                }
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("length must be at least {}, got {}", min, len));
                Err(self.fail(path, msg, "min_length")
                    .with_expected(format!("at least {}", min))
                    .with_got(len.to_string()))
            }
            Rule::MaxLength { max, message } => {
                let len = expect_length(value, path)?;
                if len <= *max {
                    return Ok(());
                }
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("length must be at most {}, got {}", max, len));
                Err(self.fail(path, msg, "max_length")
                    .with_expected(format!("at most {}", max))
                    .with_got(len.to_string()))
            }
            Rule::OneOf { allowed, message } => {
                if allowed.iter().any(|candidate| values_equal(candidate, value)) {
                    return Ok(());
                }
                let listed: Vec<String> = allowed.iter().map(Value::to_string).collect();
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("must be one of [{}]", listed.join(", ")));
                Err(self.fail(path, msg, "not_accepted")
                    .with_expected(format!("one of [{}]", listed.join(", ")))
                    .with_got(value.to_string()))
            }
            Rule::Predicate {
                name,
                test,
                message,
                ..
            } => {
                if test(value, record) {
                    Ok(())
                } else {
                    Err(self.fail(path, message.clone(), name.as_str()))
                }
            }
        }
    }

    fn fail(&self, path: &FieldPath, message: String, code: &str) -> FieldError {
        FieldError::new(path.clone(), self.kind(), message).with_code(code)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required { .. } => write!(f, "Required"),
            Rule::TypeMatch { kind, .. } => write!(f, "TypeMatch({})", kind.name()),
            Rule::Pattern { pattern, .. } => write!(f, "Pattern({:?})", pattern),
            Rule::Email { .. } => write!(f, "Email"),
            Rule::Url { .. } => write!(f, "Url"),
            Rule::Min { min, .. } => write!(f, "Min({})", min),
            Rule::Max { max, .. } => write!(f, "Max({})", max),
            Rule::Range { min, max, .. } => write!(f, "Range({}..={})", min, max),
            Rule::MinLength { min, .. } => write!(f, "MinLength({})", min),
            Rule::MaxLength { max, .. } => write!(f, "MaxLength({})", max),
            Rule::OneOf { allowed, .. } => write!(f, "OneOf({:?})", allowed),
            Rule::Predicate { name, .. } => write!(f, "Predicate({})", name),
        }
    }
}

/// Absent, null, empty string and empty sequence all count as blank.
pub(crate) fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

/// Compares two values, treating numbers by numeric value so `1` equals `1.0`.
pub(crate) fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

/// Returns the type name used when reporting a value's shape.
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) if ValueKind::File.matches(value) => "file",
        Value::Object(_) => "record",
    }
}

fn subject(path: &FieldPath) -> String {
    if path.is_root() {
        "value".to_string()
    } else {
        format!("'{}'", path)
    }
}

fn mismatch(path: &FieldPath, expected: &str, value: &Value) -> FieldError {
    FieldError::new(
        path.clone(),
        ErrorKind::TypeMismatch,
        format!("expected {}, got {}", expected, value_type_name(value)),
    )
    .with_expected(expected)
    .with_got(value_type_name(value))
}

fn expect_str<'a>(value: &'a Value, path: &FieldPath) -> Result<&'a str, FieldError> {
    value.as_str().ok_or_else(|| mismatch(path, "string", value))
}

fn expect_number(value: &Value, path: &FieldPath) -> Result<f64, FieldError> {
    value.as_f64().ok_or_else(|| mismatch(path, "number", value))
}

fn expect_length(value: &Value, path: &FieldPath) -> Result<usize, FieldError> {
    match value {
        Value::String(s) => Ok(s.encode_utf16().count()),
        Value::Array(items) => Ok(items.len()),
        _ => Err(mismatch(path, "string or sequence", value)),
    }
}
