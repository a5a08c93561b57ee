//! Repository port for user persistence and lookup.

use crate::error::ServiceErrorKind;
use crate::user::domain::{Email, User, UserId, UserStatus, Username};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// User persistence contract.
///
/// Username and email uniqueness is enforced here rather than by the domain.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user and returns it with storage timestamps applied.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateUser`],
    /// [`UserRepositoryError::DuplicateUsername`] or
    /// [`UserRepositoryError::DuplicateEmail`] when the identifier, username
    /// or email is already taken.
    async fn store(&self, user: &User) -> UserRepositoryResult<User>;

    /// Persists changes to an existing user and refreshes `updated_at`.
    ///
    /// The write is accepted only when `user` was loaded at the revision
    /// currently stored; the returned user carries the next revision.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the user does not exist,
    /// or [`UserRepositoryError::VersionConflict`] when another write landed
    /// since `user` was loaded.
    async fn update(&self, user: &User) -> UserRepositoryResult<User>;

    /// Deletes a user. Returns `false` when no such user existed.
    async fn delete(&self, id: UserId) -> UserRepositoryResult<bool>;

    /// Finds a user by identifier.
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>>;

    /// Finds a user by exact username.
    async fn find_by_username(&self, username: &Username) -> UserRepositoryResult<Option<User>>;

    /// Finds a user by normalized email address.
    async fn find_by_email(&self, email: &Email) -> UserRepositoryResult<Option<User>>;

    /// Returns `true` when the username is taken.
    async fn exists_by_username(&self, username: &Username) -> UserRepositoryResult<bool>;

    /// Returns `true` when the email address is taken.
    async fn exists_by_email(&self, email: &Email) -> UserRepositoryResult<bool>;

    /// Returns every user in the given status.
    async fn find_by_status(&self, status: UserStatus) -> UserRepositoryResult<Vec<User>>;

    /// Returns users whose username contains `fragment`, ignoring case.
    async fn search_by_username(&self, fragment: &str) -> UserRepositoryResult<Vec<User>>;

    /// Returns users whose first name contains `fragment`, ignoring case.
    async fn search_by_first_name(&self, fragment: &str) -> UserRepositoryResult<Vec<User>>;

    /// Returns users whose last name contains `fragment`, ignoring case.
    async fn search_by_last_name(&self, fragment: &str) -> UserRepositoryResult<Vec<User>>;

    /// Counts users in the given status.
    async fn count_by_status(&self, status: UserStatus) -> UserRepositoryResult<usize>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// A user with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// The username is already registered.
    #[error("username already taken: {0}")]
    DuplicateUsername(Username),

    /// The email address is already registered.
    #[error("email already registered: {0}")]
    DuplicateEmail(Email),

    /// The user was not found.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// The update was based on a stale snapshot.
    #[error("user {id} was modified concurrently: expected revision {expected}, found {found}")]
    VersionConflict {
        /// User being written.
        id: UserId,
        /// Revision currently stored.
        expected: u64,
        /// Revision the rejected write was based on.
        found: u64,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Classifies the failure for callers outside the storage boundary.
    #[must_use]
    pub const fn kind(&self) -> ServiceErrorKind {
        match self {
            Self::DuplicateUser(_)
            | Self::DuplicateUsername(_)
            | Self::DuplicateEmail(_)
            | Self::VersionConflict { .. } => ServiceErrorKind::Conflict,
            Self::NotFound(_) => ServiceErrorKind::NotFound,
            Self::Persistence(_) => ServiceErrorKind::Internal,
        }
    }
}
