//! Closed sets of string values ("enumerated fields").

use super::ValidationError;
use std::fmt::Debug;

/// A field restricted to a fixed, closed set of canonical strings.
pub trait Choice: Copy + Eq + Debug + Send + Sync + 'static {
    /// Every allowed value, in reporting order.
    const ALL: &'static [Self];

    /// Returns the canonical wire representation.
    fn as_str(self) -> &'static str;
}

/// Parses `raw` into one of the allowed values of `T`.
///
/// Matching is exact: `"Pending"` is not `"pending"`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidChoice`] naming `field` and listing the
/// allowed values when `raw` matches none of them.
pub fn parse_choice<T: Choice>(field: &'static str, raw: &str) -> Result<T, ValidationError> {
    T::ALL
        .iter()
        .copied()
        .find(|candidate| candidate.as_str() == raw)
        .ok_or_else(|| ValidationError::InvalidChoice {
            field,
            value: raw.to_owned(),
            expected: T::ALL
                .iter()
                .map(|choice| choice.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
}

/// Parses an optional raw value, passing `None` through untouched.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidChoice`] when a supplied value is not
/// allowed.
pub fn parse_optional_choice<T: Choice>(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<T>, ValidationError> {
    raw.map(|value| parse_choice(field, value)).transpose()
}
