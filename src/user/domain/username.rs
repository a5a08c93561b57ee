//! Validated username type.

use super::UserDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum username length in characters.
const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum username length, matching the `VARCHAR(50)` column.
const MAX_USERNAME_LENGTH: usize = 50;

/// Trimmed username between 3 and 50 characters.
///
/// Uniqueness is enforced by the storage boundary, not by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Creates a validated username.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyUsername`] when the value is blank or
    /// [`UserDomainError::InvalidUsernameLength`] when the trimmed value is
    /// outside the 3 to 50 character range.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if normalized.is_empty() {
            return Err(UserDomainError::EmptyUsername);
        }
        let length = normalized.chars().count();
        if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&length) {
            return Err(UserDomainError::InvalidUsernameLength(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(username: Username) -> Self {
        username.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
