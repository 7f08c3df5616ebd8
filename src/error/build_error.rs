//! Errors raised while constructing a schema.

/// Errors that can occur while building a [`SchemaDefinition`](crate::SchemaDefinition).
#[derive(Debug, thiserror::Error)]
pub enum SchemaBuildError {
    /// A `pattern` rule was given a regex that does not compile.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A numeric range whose lower bound exceeds its upper bound.
    #[error("invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: f64, max: f64 },
}
