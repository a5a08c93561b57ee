//! Service layer for user registration and account lifecycle.

use crate::error::ServiceErrorKind;
use crate::project::ports::{ProjectRepository, ProjectRepositoryError};
use crate::user::{
    domain::{Email, User, UserDomainError, UserId, Username},
    ports::{UserRepository, UserRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Request payload for registering a user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    username: String,
    email: String,
    password: String,
    first_name: Option<String>,
    last_name: Option<String>,
}

impl RegisterUserRequest {
    /// Creates a request with the required credentials.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            first_name: None,
            last_name: None,
        }
    }

    /// Sets the first name.
    #[must_use]
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    /// Sets the last name.
    #[must_use]
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }
}

/// Service-level errors for user account operations.
#[derive(Debug, Error)]
pub enum UserAccountError {
    /// Domain validation or a lifecycle rule failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),

    /// User repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),

    /// Loading the user's projects failed.
    #[error(transparent)]
    Projects(#[from] ProjectRepositoryError),

    /// The username is already registered.
    #[error("username already taken: {0}")]
    UsernameTaken(Username),

    /// The email address is already registered.
    #[error("email already registered: {0}")]
    EmailTaken(Email),

    /// No user exists with the identifier.
    #[error("user not found: {0}")]
    NotFound(UserId),
}

impl UserAccountError {
    /// Classifies the error for transport mapping.
    #[must_use]
    pub fn kind(&self) -> ServiceErrorKind {
        match self {
            Self::Domain(err) => err.kind().into(),
            Self::Repository(err) => err.kind(),
            Self::Projects(err) => err.kind(),
            Self::UsernameTaken(_) | Self::EmailTaken(_) => ServiceErrorKind::Conflict,
            Self::NotFound(_) => ServiceErrorKind::NotFound,
        }
    }
}

/// Result type for user account service operations.
pub type UserAccountResult<T> = Result<T, UserAccountError>;

/// User account orchestration service.
///
/// Each mutating call loads one user, applies one domain operation and
/// persists the result.
pub struct UserAccountService<U, P>
where
    U: UserRepository,
    P: ProjectRepository,
{
    users: Arc<U>,
    projects: Arc<P>,
}

impl<U, P> Clone for UserAccountService<U, P>
where
    U: UserRepository,
    P: ProjectRepository,
{
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            projects: Arc::clone(&self.projects),
        }
    }
}

impl<U, P> UserAccountService<U, P>
where
    U: UserRepository,
    P: ProjectRepository,
{
    /// Creates a new user account service.
    #[must_use]
    pub const fn new(users: Arc<U>, projects: Arc<P>) -> Self {
        Self { users, projects }
    }

    /// Registers a new active user.
    ///
    /// # Errors
    ///
    /// Returns [`UserAccountError::Domain`] when a field is invalid,
    /// [`UserAccountError::UsernameTaken`] or [`UserAccountError::EmailTaken`]
    /// when the credentials collide with an existing account, or
    /// [`UserAccountError::Repository`] when persistence fails.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterUserRequest) -> UserAccountResult<User> {
        let user = User::new(
            &request.username,
            &request.email,
            &request.password,
            request.first_name,
            request.last_name,
        )?;

        if self.users.exists_by_username(user.username()).await? {
            debug!("registration rejected, username taken");
            return Err(UserAccountError::UsernameTaken(user.username().clone()));
        }
        if self.users.exists_by_email(user.email()).await? {
            debug!("registration rejected, email taken");
            return Err(UserAccountError::EmailTaken(user.email().clone()));
        }

        let stored = self.users.store(&user).await?;
        info!(user_id = %stored.id(), "registered user");
        Ok(stored)
    }

    /// Retrieves a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserAccountError::Repository`] when the lookup fails.
    pub async fn find_by_id(&self, id: UserId) -> UserAccountResult<Option<User>> {
        Ok(self.users.find_by_id(id).await?)
    }

    /// Retrieves a user by username.
    ///
    /// # Errors
    ///
    /// Returns [`UserAccountError::Domain`] when `username` is not a valid
    /// username, or [`UserAccountError::Repository`] when the lookup fails.
    pub async fn find_by_username(&self, username: &str) -> UserAccountResult<Option<User>> {
        let key = Username::new(username)?;
        Ok(self.users.find_by_username(&key).await?)
    }

    /// Retrieves a user by email address.
    ///
    /// # Errors
    ///
    /// Returns [`UserAccountError::Domain`] when `email` is malformed, or
    /// [`UserAccountError::Repository`] when the lookup fails.
    pub async fn find_by_email(&self, email: &str) -> UserAccountResult<Option<User>> {
        let key = Email::new(email)?;
        Ok(self.users.find_by_email(&key).await?)
    }

    /// Reactivates an inactive or suspended user.
    ///
    /// # Errors
    ///
    /// Returns [`UserAccountError::NotFound`] for an unknown user or
    /// [`UserAccountError::Domain`] when the user is already active.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn activate(&self, id: UserId) -> UserAccountResult<User> {
        let mut user = self.load(id).await?;
        user.activate().inspect_err(|err| debug!(%err, "activation rejected"))?;
        let stored = self.users.update(&user).await?;
        info!(status = %stored.status(), "activated user");
        Ok(stored)
    }

    /// Deactivates a user after checking every project they own.
    ///
    /// # Errors
    ///
    /// Returns [`UserAccountError::NotFound`] for an unknown user,
    /// [`UserAccountError::Projects`] when owned projects cannot be loaded, or
    /// [`UserAccountError::Domain`] when the user is already inactive or still
    /// owns an active project.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn deactivate(&self, id: UserId) -> UserAccountResult<User> {
        let mut user = self.load(id).await?;
        let owned = self.projects.find_by_owner(id).await?;
        user.deactivate(&owned)
            .inspect_err(|err| debug!(%err, "deactivation rejected"))?;
        let stored = self.users.update(&user).await?;
        info!(status = %stored.status(), "deactivated user");
        Ok(stored)
    }

    /// Replaces the user's first and last name.
    ///
    /// # Errors
    ///
    /// Returns [`UserAccountError::NotFound`] for an unknown user or
    /// [`UserAccountError::Domain`] when the user is not active.
    #[instrument(skip(self, first_name, last_name), fields(user_id = %id))]
    pub async fn update_profile(
        &self,
        id: UserId,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> UserAccountResult<User> {
        let mut user = self.load(id).await?;
        user.update_profile(first_name, last_name)?;
        Ok(self.users.update(&user).await?)
    }

    /// Changes the user's password after verifying the current one.
    ///
    /// # Errors
    ///
    /// Returns [`UserAccountError::NotFound`] for an unknown user or
    /// [`UserAccountError::Domain`] when the user is not active, the current
    /// password is wrong, or the new password is unchanged or too short.
    #[instrument(skip(self, current, new), fields(user_id = %id))]
    pub async fn change_password(
        &self,
        id: UserId,
        current: &str,
        new: &str,
    ) -> UserAccountResult<User> {
        let mut user = self.load(id).await?;
        user.change_password(current, new)
            .inspect_err(|err| debug!(%err, "password change rejected"))?;
        let stored = self.users.update(&user).await?;
        info!("changed password");
        Ok(stored)
    }

    async fn load(&self, id: UserId) -> UserAccountResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(UserAccountError::NotFound(id))
    }
}
