//! Error types for user domain validation and lifecycle rules.

use super::{UserId, UserStatus};
use crate::error::ErrorKind;
use thiserror::Error;

/// Errors returned while constructing or mutating user domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The username is outside the 3 to 50 character range.
    #[error("username '{0}' must be between 3 and 50 characters")]
    InvalidUsernameLength(String),

    /// The email address is empty after trimming.
    #[error("email must not be empty")]
    EmptyEmail,

    /// The email address does not match the `local@domain.tld` grammar.
    #[error("invalid email format: {0}")]
    InvalidEmail(String),

    /// The password is empty.
    #[error("password must not be empty")]
    EmptyPassword,

    /// The password is shorter than the policy minimum.
    #[error("password must be at least {minimum} characters long")]
    PasswordTooShort {
        /// Minimum number of characters required by the policy.
        minimum: usize,
    },

    /// The password does not satisfy the strict character-class policy.
    #[error(
        "password must contain at least one lowercase letter, one uppercase letter, one digit, and one special character (@$!%*?&)"
    )]
    PasswordPolicyViolation,

    /// The supplied current password does not match the stored secret.
    #[error("current password is incorrect")]
    IncorrectPassword,

    /// The new password equals the current password.
    #[error("new password must be different from current password")]
    PasswordUnchanged,

    /// The user is already active.
    #[error("user {0} is already active")]
    AlreadyActive(UserId),

    /// The user is already inactive.
    #[error("user {0} is already inactive")]
    AlreadyInactive(UserId),

    /// The operation requires an active user.
    #[error("user {user_id} is {status}, operation requires an active user")]
    NotActive {
        /// User identifier.
        user_id: UserId,
        /// Current lifecycle status.
        status: UserStatus,
    },

    /// The user still owns active projects and cannot be deactivated.
    #[error("cannot deactivate user {user_id} while it owns {active_projects} active project(s)")]
    OwnsActiveProjects {
        /// User identifier.
        user_id: UserId,
        /// Number of owned projects that are still active.
        active_projects: usize,
    },
}

impl UserDomainError {
    /// Classifies the error into one of the three domain failure kinds.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyUsername
            | Self::InvalidUsernameLength(_)
            | Self::EmptyEmail
            | Self::InvalidEmail(_)
            | Self::EmptyPassword
            | Self::PasswordTooShort { .. }
            | Self::PasswordPolicyViolation
            | Self::IncorrectPassword
            | Self::PasswordUnchanged => ErrorKind::InvalidArgument,
            Self::AlreadyActive(_) | Self::AlreadyInactive(_) | Self::NotActive { .. } => {
                ErrorKind::InvalidState
            }
            Self::OwnsActiveProjects { .. } => ErrorKind::InvariantViolation,
        }
    }
}

/// Error returned while parsing user status from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown user status: {0}")]
pub struct ParseUserStatusError(pub String);
