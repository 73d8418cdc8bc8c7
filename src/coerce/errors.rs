//! Coercion error types

use thiserror::Error;

/// Result type for coercion
pub type CoerceResult<T> = Result<T, CoerceError>;

/// Coercion failures.
///
/// `Configuration` points at a broken schema definition; the other variants
/// point at a value that cannot be represented by its logical type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoerceError {
    /// Schema is missing a required parameter or carries a malformed one
    #[error("Schema configuration error: {reason}")]
    Configuration { reason: String },

    /// Text is not valid base64
    #[error("Invalid base64 payload: {0}")]
    InvalidEncoding(String),

    /// Value does not fit the logical type
    #[error("{logical} value {value} is out of range")]
    OutOfRange { logical: &'static str, value: String },

    /// Decimal would lose digits when moved to the declared scale
    #[error("Decimal {value} cannot be rescaled to scale {scale} without rounding")]
    InexactRescale { value: String, scale: u32 },
}

impl CoerceError {
    pub fn configuration(reason: impl Into<String>) -> Self {
        CoerceError::Configuration {
            reason: reason.into(),
        }
    }

    pub fn out_of_range(logical: &'static str, value: impl ToString) -> Self {
        CoerceError::OutOfRange {
            logical,
            value: value.to_string(),
        }
    }

    /// Returns true if the schema, not the value, is at fault
    pub fn is_configuration(&self) -> bool {
        matches!(self, CoerceError::Configuration { .. })
    }
}
