//! Field specifications: an ordered, short-circuiting rule chain for one field.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{FieldError, FieldErrors, SchemaBuildError};
use crate::path::FieldPath;

use super::rule::{Rule, ValueKind};
use super::traits::FieldValidator;

/// Which part of the chain the next `.error()` call applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastAdded {
    Type,
    Required,
    Rule,
}

/// The rule chain for a single field.
///
/// The effective chain is always `required` (if set), then the type check for
/// the field's [`ValueKind`], then the declared rules in order. Evaluation stops
/// at the first failure, so an empty required field never reports a format
/// error.
///
/// When the field is not required and its value is absent or null, no rule
/// runs at all.
///
/// # Example
///
/// ```rust
/// use fieldguard::{FieldPath, Schema};
/// use serde_json::json;
///
/// let mobile = Schema::string()
///     .pattern(r"\d{10}")
///     .unwrap()
///     .error("Invalid mobile number")
///     .required()
///     .error("Mobile number is required");
///
/// let path = FieldPath::from_field("mobileNumber");
/// let record = json!({});
///
/// let err = mobile.check(Some(&json!("")), &record, &path).unwrap_err();
/// assert_eq!(err.message, "Mobile number is required");
///
/// let err = mobile.check(Some(&json!("12345")), &record, &path).unwrap_err();
/// assert_eq!(err.message, "Invalid mobile number");
///
/// assert!(mobile.check(Some(&json!("1234567890")), &record, &path).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct FieldSpec {
    kind: ValueKind,
    required: Option<Rule>,
    type_rule: Option<Rule>,
    rules: Vec<Rule>,
    last: LastAdded,
}

impl FieldSpec {
    /// Creates an optional field of the given kind with no further rules.
    pub fn new(kind: ValueKind) -> Self {
        let type_rule = match kind {
            ValueKind::Any => None,
            kind => Some(Rule::type_match(kind)),
        };
        Self {
            kind,
            required: None,
            type_rule,
            rules: Vec::new(),
            last: LastAdded::Type,
        }
    }

    /// Marks the field as required.
    ///
    /// The required check always runs first, wherever in the builder chain
    /// this is called.
    pub fn required(mut self) -> Self {
        if self.required.is_none() {
            self.required = Some(Rule::required());
        }
        self.last = LastAdded::Required;
        self
    }

    /// Appends an arbitrary rule to the chain.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self.last = LastAdded::Rule;
        self
    }

    /// Adds a full-match regex rule.
    ///
    /// # Errors
    ///
    /// Returns `SchemaBuildError::InvalidPattern` if the regex does not compile.
    pub fn pattern(self, pattern: &str) -> Result<Self, SchemaBuildError> {
        Ok(self.rule(Rule::pattern(pattern)?))
    }

    pub fn email(self) -> Self {
        self.rule(Rule::email())
    }

    pub fn url(self) -> Self {
        self.rule(Rule::url())
    }

    pub fn min(self, min: f64) -> Self {
        self.rule(Rule::min(min))
    }

    pub fn max(self, max: f64) -> Self {
        self.rule(Rule::max(max))
    }

    /// Adds an inclusive numeric range rule.
    ///
    /// # Errors
    ///
    /// Returns `SchemaBuildError::InvalidRange` if `min > max`.
    pub fn range(self, min: f64, max: f64) -> Result<Self, SchemaBuildError> {
        Ok(self.rule(Rule::range(min, max)?))
    }

    pub fn min_length(self, min: usize) -> Self {
        self.rule(Rule::min_length(min))
    }

    pub fn max_length(self, max: usize) -> Self {
        self.rule(Rule::max_length(max))
    }

    pub fn one_of<I, V>(self, allowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.rule(Rule::one_of(allowed))
    }

    /// Adds a custom predicate over `(value, record)`.
    pub fn predicate<F>(self, name: impl Into<String>, message: impl Into<String>, test: F) -> Self
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        self.rule(Rule::predicate(name, message, test))
    }

    /// Accepts only files whose declared MIME type is listed.
    pub fn accepted_mime_types<I, S>(self, mime_types: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rule(Rule::accepted_mime_types(mime_types, message))
    }

    /// Sets the error message for the most recently added rule.
    ///
    /// Called right after construction it sets the type mismatch message;
    /// after `.required()` it sets the missing-value message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fieldguard::{FieldPath, Schema};
    /// use serde_json::json;
    ///
    /// let name = Schema::string()
    ///     .error("must be text")
    ///     .required()
    ///     .error("First Name is required");
    ///
    /// let path = FieldPath::from_field("firstName");
    /// let err = name.check(Some(&json!(7)), &json!({}), &path).unwrap_err();
    /// assert_eq!(err.message, "must be text");
    /// ```
    pub fn error(mut self, message: impl Into<String>) -> Self {
        let target = match self.last {
            LastAdded::Type => self.type_rule.as_mut(),
            LastAdded::Required => self.required.as_mut(),
            LastAdded::Rule => self.rules.last_mut(),
        };
        if let Some(rule) = target {
            rule.set_message(message);
        }
        self
    }

    /// Returns the declared value kind.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Returns true if the field has a required check.
    pub fn is_required(&self) -> bool {
        self.required.is_some()
    }

    /// Returns the effective chain in evaluation order.
    pub fn chain(&self) -> impl Iterator<Item = &Rule> {
        self.required
            .iter()
            .chain(self.type_rule.iter())
            .chain(self.rules.iter())
    }

    /// Runs the chain against a field value, stopping at the first failure.
    ///
    /// `value` is `None` when the field is absent. `record` is the record the
    /// field belongs to.
    pub fn check(
        &self,
        value: Option<&Value>,
        record: &Value,
        path: &FieldPath,
    ) -> Result<(), FieldError> {
        let present = value.filter(|v| !v.is_null());
        if present.is_none() && self.required.is_none() {
            return Ok(());
        }
        self.chain()
            .try_for_each(|rule| rule.apply(present, record, path))
    }
}

impl Default for FieldSpec {
    fn default() -> Self {
        Self::new(ValueKind::Any)
    }
}

impl FieldValidator for FieldSpec {
    fn validate_field(
        &self,
        value: Option<&Value>,
        record: &Value,
        path: &FieldPath,
    ) -> Validation<(), FieldErrors> {
        match self.check(value, record, path) {
            Ok(()) => Validation::Success(()),
            Err(err) => Validation::Failure(FieldErrors::single(err)),
        }
    }
}
