//! Password value object with strict and weak construction policies.

use super::UserDomainError;
use std::fmt;

/// Minimum length accepted by [`Password::strict`].
const STRICT_MIN_LENGTH: usize = 8;

/// Minimum length accepted by [`Password::weak`].
const WEAK_MIN_LENGTH: usize = 6;

/// Length at which the strength score awards its second length bonus.
const LONG_PASSWORD_LENGTH: usize = 12;

/// Symbols recognised by the strict policy and the strength score.
const SPECIAL_CHARACTERS: [char; 7] = ['@', '$', '!', '%', '*', '?', '&'];

/// Raw account secret.
///
/// Two independent policies construct it. [`Password::strict`] requires at
/// least eight characters drawn from letters, digits and `@$!%*?&`, with at
/// least one character of each class. [`Password::weak`] requires only six
/// characters. [`Password::is_strong`] always reports the strict policy,
/// whichever constructor was used.
///
/// `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Password(String);

impl Password {
    /// Creates a password under the strict policy.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyPassword`],
    /// [`UserDomainError::PasswordTooShort`] or
    /// [`UserDomainError::PasswordPolicyViolation`] naming the first rule the
    /// value breaks.
    pub fn strict(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        if raw.is_empty() {
            return Err(UserDomainError::EmptyPassword);
        }
        if raw.chars().count() < STRICT_MIN_LENGTH {
            return Err(UserDomainError::PasswordTooShort {
                minimum: STRICT_MIN_LENGTH,
            });
        }
        if !satisfies_strict_policy(&raw) {
            return Err(UserDomainError::PasswordPolicyViolation);
        }
        Ok(Self(raw))
    }

    /// Creates a password under the weak policy (length only).
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyPassword`] or
    /// [`UserDomainError::PasswordTooShort`].
    pub fn weak(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        if raw.is_empty() {
            return Err(UserDomainError::EmptyPassword);
        }
        if raw.chars().count() < WEAK_MIN_LENGTH {
            return Err(UserDomainError::PasswordTooShort {
                minimum: WEAK_MIN_LENGTH,
            });
        }
        Ok(Self(raw))
    }

    /// Returns the raw secret for storage adapters and comparisons.
    #[must_use]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Returns `true` when both passwords hold the same secret.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    /// Returns `true` when the secret satisfies the strict policy.
    #[must_use]
    pub fn is_strong(&self) -> bool {
        satisfies_strict_policy(&self.0)
    }

    /// Returns a strength score between 0 and 100.
    ///
    /// Length of at least 8 scores 20 and at least 12 a further 10. A
    /// lowercase letter scores 20, an uppercase letter 20, a digit 15 and a
    /// symbol from `@$!%*?&` 15.
    #[must_use]
    pub fn strength(&self) -> u8 {
        let length = self.0.chars().count();
        let criteria: [(bool, u8); 6] = [
            (length >= STRICT_MIN_LENGTH, 20),
            (length >= LONG_PASSWORD_LENGTH, 10),
            (self.0.chars().any(|c| c.is_ascii_lowercase()), 20),
            (self.0.chars().any(|c| c.is_ascii_uppercase()), 20),
            (self.0.chars().any(|c| c.is_ascii_digit()), 15),
            (self.0.chars().any(is_special_character), 15),
        ];
        let score: u8 = criteria
            .iter()
            .filter(|(met, _)| *met)
            .map(|(_, points)| *points)
            .sum();
        score.min(100)
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(********)")
    }
}

fn is_special_character(c: char) -> bool {
    SPECIAL_CHARACTERS.contains(&c)
}

fn satisfies_strict_policy(value: &str) -> bool {
    let only_allowed = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || is_special_character(c));

    only_allowed
        && value.chars().count() >= STRICT_MIN_LENGTH
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(is_special_character)
}
