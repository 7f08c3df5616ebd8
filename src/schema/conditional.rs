//! Conditional fields whose rule chain depends on a sibling's value.
//!
//! A [`ConditionalSpec`] names a discriminator field and maps discriminator
//! values to branches. The branch is resolved against the record being
//! validated on every call, never at schema construction.

use serde_json::Value;
use stillwater::Validation;
use tracing::debug;

use crate::error::FieldErrors;
use crate::path::FieldPath;

use super::field::FieldSpec;
use super::rule::values_equal;
use super::traits::FieldValidator;

/// One alternative of a conditional field.
#[derive(Debug, Clone)]
pub enum Branch {
    /// Validate the field with this spec.
    Spec(FieldSpec),
    /// Leave the field unvalidated.
    Inherit,
}

/// The outcome of resolving a [`ConditionalSpec`] against a record.
#[derive(Debug, Clone, Copy)]
pub enum Resolution<'a> {
    /// This spec governs the field for the current call.
    Spec(&'a FieldSpec),
    /// The field passes through unvalidated.
    Inherit,
}

impl<'a> From<&'a Branch> for Resolution<'a> {
    fn from(branch: &'a Branch) -> Self {
        match branch {
            Branch::Spec(spec) => Resolution::Spec(spec),
            Branch::Inherit => Resolution::Inherit,
        }
    }
}

/// A field validated by a branch selected from another field's value.
///
/// Branches are keyed by equality with the discriminator's value. When no
/// branch matches, the `otherwise` branch applies; it defaults to
/// [`Branch::Inherit`], which skips validation of the field entirely.
///
/// # Example
///
/// ```rust
/// use fieldguard::{Resolution, Schema};
/// use serde_json::json;
///
/// let website = Schema::conditional("cvType").when(
///     "online",
///     Schema::string().url().required().error("Website Link is required"),
/// );
///
/// assert!(matches!(website.resolve(&json!({"cvType": "online"})), Resolution::Spec(_)));
/// assert!(matches!(website.resolve(&json!({"cvType": "offline"})), Resolution::Inherit));
/// ```
#[derive(Debug, Clone)]
pub struct ConditionalSpec {
    discriminator: FieldPath,
    branches: Vec<(Value, Branch)>,
    otherwise: Branch,
}

impl ConditionalSpec {
    /// Creates a conditional keyed on the field at `discriminator`.
    ///
    /// The path is resolved relative to the record that holds the dependent
    /// field and may be nested (`meta.mode`).
    pub fn on(discriminator: impl Into<FieldPath>) -> Self {
        Self {
            discriminator: discriminator.into(),
            branches: Vec::new(),
            otherwise: Branch::Inherit,
        }
    }

    /// Validates the field with `spec` when the discriminator equals `value`.
    ///
    /// Numbers match by numeric value, so a branch declared for `1` also
    /// governs `1.0`. Declaring the same value again replaces the earlier branch.
    pub fn when(self, value: impl Into<Value>, spec: FieldSpec) -> Self {
        self.branch(value.into(), Branch::Spec(spec))
    }

    /// Skips validation when the discriminator equals `value`.
    pub fn when_inherit(self, value: impl Into<Value>) -> Self {
        self.branch(value.into(), Branch::Inherit)
    }

    /// Validates the field with `spec` when no branch matches.
    pub fn otherwise(mut self, spec: FieldSpec) -> Self {
        self.otherwise = Branch::Spec(spec);
        self
    }

    fn branch(mut self, value: Value, branch: Branch) -> Self {
        match self.branches.iter().position(|(key, _)| values_equal(key, &value)) {
            Some(idx) => self.branches[idx].1 = branch,
            None => self.branches.push((value, branch)),
        }
        self
    }

    /// Returns the discriminator path.
    pub fn discriminator(&self) -> &FieldPath {
        &self.discriminator
    }

    /// Returns the declared branches in declaration order.
    pub fn branches(&self) -> impl Iterator<Item = (&Value, &Branch)> {
        self.branches.iter().map(|(key, branch)| (key, branch))
    }

    /// Selects the branch governing the field for this record.
    ///
    /// An absent discriminator matches no branch.
    pub fn resolve(&self, record: &Value) -> Resolution<'_> {
        let current = self.discriminator.lookup(record);
        let matched = current.and_then(|current| {
            self.branches
                .iter()
                .find(|(key, _)| values_equal(key, current))
                .map(|(_, branch)| branch)
        });

        let resolution = Resolution::from(matched.unwrap_or(&self.otherwise));
        debug!(
            discriminator = %self.discriminator,
            value = ?current,
            matched = matched.is_some(),
            inherit = matches!(resolution, Resolution::Inherit),
            "resolved conditional field"
        );
        resolution
    }
}

impl FieldValidator for ConditionalSpec {
    fn validate_field(
        &self,
        value: Option<&Value>,
        record: &Value,
        path: &FieldPath,
    ) -> Validation<(), FieldErrors> {
        match self.resolve(record) {
            Resolution::Spec(spec) => spec.validate_field(value, record, path),
            Resolution::Inherit => Validation::Success(()),
        }
    }
}
