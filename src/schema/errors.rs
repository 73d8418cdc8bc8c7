//! Schema error types
//!
//! Raised while building, decoding or loading schemas. Coercion failures of
//! default values surface through [`SchemaError::Coerce`].

use thiserror::Error;

use crate::coerce::CoerceError;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Schema definition and loading errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Schema source could not be read
    #[error("Failed to read schema source '{path}': {reason}")]
    Io { path: String, reason: String },

    /// Schema definition is structurally invalid
    #[error("Malformed schema '{source_name}': {reason}")]
    Malformed { source_name: String, reason: String },

    /// A schema with the same name and version is already registered
    #[error("Schema '{name}' version {version} is already registered")]
    Duplicate { name: String, version: String },

    /// A default value does not coerce to its schema
    #[error("Invalid default value: {0}")]
    Coerce(#[from] CoerceError),
}

impl SchemaError {
    /// Create a malformed schema error
    pub fn malformed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        SchemaError::Malformed {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Create an I/O error for the given path
    pub fn io(path: impl Into<String>, reason: impl ToString) -> Self {
        SchemaError::Io {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a duplicate registration error
    pub fn duplicate(name: impl Into<String>, version: Option<i32>) -> Self {
        SchemaError::Duplicate {
            name: name.into(),
            version: version.map_or_else(|| "<none>".to_string(), |v| v.to_string()),
        }
    }
}
