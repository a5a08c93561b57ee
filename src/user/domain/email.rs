//! Email address value object.

use super::UserDomainError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Address grammar applied to the lower-cased input.
#[expect(clippy::expect_used, reason = "the pattern is a compile-time constant")]
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$").expect("valid email pattern")
});

/// Normalized, validated email address.
///
/// The value is trimmed and lower-cased before validation, so equality and
/// hashing operate on the normalized form.
///
/// # Examples
///
///     use taskflow::user::domain::Email;
///
///     let email = Email::new(" Alice@Example.COM ").expect("valid");
///     assert_eq!(email.as_str(), "alice@example.com");
///     assert_eq!(email.domain(), "example.com");
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyEmail`] when the value is blank or
    /// [`UserDomainError::InvalidEmail`] when it does not match the
    /// `local@domain.tld` grammar with a TLD of at least two letters.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(UserDomainError::EmptyEmail);
        }
        if !EMAIL_PATTERN.is_match(&normalized) {
            return Err(UserDomainError::InvalidEmail(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the normalized address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the part after the `@`.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map_or("", |(_, domain)| domain)
    }

    /// Returns the part before the `@`.
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split_once('@').map_or("", |(local, _)| local)
    }

    /// Returns `true` when the address belongs to `domain`, ignoring case.
    #[must_use]
    pub fn is_from_domain(&self, domain: &str) -> bool {
        self.domain().eq_ignore_ascii_case(domain.trim())
    }
}

impl TryFrom<String> for Email {
    type Error = UserDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
