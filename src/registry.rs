//! Named schema storage.
//!
//! This module provides the [`SchemaRegistry`] type that lets a host register
//! each of its form schemas once, under a name, and validate records against
//! them from any thread.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::schema::SchemaDefinition;
use crate::validation::{ValidationResult, Validator};

/// Type alias for the schema storage map.
type SchemaMap = Arc<RwLock<HashMap<String, Arc<SchemaDefinition>>>>;

/// A thread-safe registry of named schema definitions.
///
/// Registered schemas are immutable. Registration takes the write lock;
/// lookups and validation take the read lock only long enough to clone the
/// schema's `Arc`, so validations never hold the lock while running.
///
/// Cloning a registry yields a handle to the same storage.
///
/// # Example
///
/// ```rust
/// use fieldguard::{Schema, SchemaRegistry};
/// use serde_json::json;
///
/// let registry = SchemaRegistry::new();
/// registry
///     .register("signup", Schema::definition().field("email", Schema::string().email().required()))
///     .unwrap();
///
/// let result = registry.validate("signup", &json!({"email": "ada@example.com"})).unwrap();
/// assert!(result.is_ok());
///
/// assert!(registry.validate("missing", &json!({})).is_err());
/// ```
#[derive(Clone)]
pub struct SchemaRegistry {
    schemas: SchemaMap,
    validator: Validator,
}

impl SchemaRegistry {
    /// Creates an empty registry that validates with default options.
    pub fn new() -> Self {
        Self::with_validator(Validator::new())
    }

    /// Creates an empty registry that validates with `validator`.
    pub fn with_validator(validator: Validator) -> Self {
        Self {
            schemas: Arc::new(RwLock::new(HashMap::new())),
            validator,
        }
    }

    /// Registers a schema under `name`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already registered.
    pub fn register(
        &self,
        name: impl Into<String>,
        schema: impl Into<Arc<SchemaDefinition>>,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        let mut schemas = self.schemas.write();

        if schemas.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        schemas.insert(name, schema.into());
        Ok(())
    }

    /// Retrieves a schema by name.
    pub fn get(&self, name: &str) -> Option<Arc<SchemaDefinition>> {
        self.schemas.read().get(name).cloned()
    }

    /// Returns the registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.schemas.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.read().len()
    }

    /// Returns true if no schemas are registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.read().is_empty()
    }

    /// Validates a record against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::SchemaNotFound` if the schema name doesn't exist.
    pub fn validate(
        &self,
        schema_name: &str,
        record: &Value,
    ) -> Result<ValidationResult, RegistryError> {
        let schema = self
            .get(schema_name)
            .ok_or_else(|| RegistryError::SchemaNotFound(schema_name.to_string()))?;

        Ok(self.validator.validate(record, &schema))
    }

    /// Validates many records against a named schema in parallel.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::SchemaNotFound` if the schema name doesn't exist.
    pub fn validate_batch(
        &self,
        schema_name: &str,
        records: &[Value],
    ) -> Result<Vec<ValidationResult>, RegistryError> {
        let schema = self
            .get(schema_name)
            .ok_or_else(|| RegistryError::SchemaNotFound(schema_name.to_string()))?;

        Ok(self.validator.validate_batch(records, &schema))
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a schema with a name that already exists.
    #[error("schema '{0}' already registered")]
    DuplicateName(String),

    /// Attempted to validate with a schema name that doesn't exist.
    #[error("schema '{0}' not found")]
    SchemaNotFound(String),
}
