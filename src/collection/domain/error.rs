//! Validation errors raised before a record reaches storage.

use thiserror::Error;

/// Input that violates a field constraint.
///
/// Validation errors are always recoverable by the caller correcting the
/// input and are never retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is missing or blank after trimming.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Wire name of the offending field.
        field: &'static str,
    },

    /// An enumerated field holds a value outside its allowed set.
    #[error("invalid {field} '{value}', expected one of: {expected}")]
    InvalidChoice {
        /// Wire name of the offending field.
        field: &'static str,
        /// Rejected value as supplied.
        value: String,
        /// Comma-separated list of allowed values.
        expected: String,
    },

    /// The email address does not follow `local@domain.tld` syntax.
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
}

/// Trims `value` and rejects it when nothing remains.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyField`] naming `field` when the trimmed
/// value is empty.
pub fn require_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(trimmed.to_owned())
}
