//! Validated email address.

use crate::collection::domain::{ValidationError, require_text};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest address accepted; matches the `users.email` column width.
const MAX_EMAIL_LENGTH: usize = 320;

#[expect(
    clippy::expect_used,
    reason = "pattern is a literal and is covered by unit tests"
)]
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("valid email regex"));

/// Email address with `local@domain.tld` syntax.
///
/// Addresses are compared by exact match, so `A@x.com` and `a@x.com` are
/// different addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address from a trimmed value.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] when the value is blank or
    /// [`ValidationError::InvalidEmail`] when it is not a valid address.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = require_text("email", value.as_ref())?;
        if trimmed.len() > MAX_EMAIL_LENGTH || !EMAIL_RE.is_match(&trimmed) {
            return Err(ValidationError::InvalidEmail(trimmed));
        }
        Ok(Self(trimmed))
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
