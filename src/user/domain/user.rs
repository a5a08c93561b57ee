//! User aggregate root.

use super::{Email, Password, UserDomainError, UserId, UserStatus, Username};
use crate::project::domain::{Project, ProjectStatus};
use chrono::{DateTime, Utc};
use std::hash::{Hash, Hasher};

/// User aggregate root.
///
/// A user owns projects through the project's `owner_id`. The owned projects
/// are not held here; operations that depend on them receive the current
/// collection as an argument.
///
/// Equality and hashing are defined by identifier only.
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    username: Username,
    email: Email,
    password: Password,
    first_name: Option<String>,
    last_name: Option<String>,
    status: UserStatus,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    version: u64,
}

/// Parameter object for reconstructing a persisted user aggregate.
#[derive(Debug, Clone)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted username.
    pub username: Username,
    /// Persisted email address.
    pub email: Email,
    /// Persisted secret.
    pub password: Password,
    /// Persisted first name, if any.
    pub first_name: Option<String>,
    /// Persisted last name, if any.
    pub last_name: Option<String>,
    /// Persisted lifecycle status.
    pub status: UserStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Revision counter assigned by storage.
    pub version: u64,
}

impl User {
    /// Creates a new active user.
    ///
    /// The password is checked with [`Password::weak`], the account policy.
    /// The stricter [`Password::strict`] policy is independent and is not
    /// applied here.
    ///
    /// # Errors
    ///
    /// Returns a [`UserDomainError`] naming the first invalid field, checked
    /// in the order username, email, password.
    pub fn new(
        username: &str,
        email: &str,
        password: &str,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Result<Self, UserDomainError> {
        Ok(Self {
            id: UserId::new(),
            username: Username::new(username)?,
            email: Email::new(email)?,
            password: Password::weak(password)?,
            first_name,
            last_name,
            status: UserStatus::Active,
            created_at: None,
            updated_at: None,
            version: 0,
        })
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            username: data.username,
            email: data.email,
            password: data.password,
            first_name: data.first_name,
            last_name: data.last_name,
            status: data.status,
            created_at: Some(data.created_at),
            updated_at: Some(data.updated_at),
            version: data.version,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Returns the stored secret.
    #[must_use]
    pub const fn password(&self) -> &Password {
        &self.password
    }

    /// Returns the first name, if any.
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    /// Returns the last name, if any.
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> UserStatus {
        self.status
    }

    /// Returns the creation timestamp assigned by storage.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Returns the latest update timestamp assigned by storage.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns the storage revision this snapshot was loaded at.
    ///
    /// Zero until the first insert; each accepted update advances it by one.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns `true` once storage has recorded the first insert.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.created_at.is_some()
    }

    /// Returns "first last", falling back to whichever name is present and
    /// finally to the username.
    #[must_use]
    pub fn full_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(name), None) | (None, Some(name)) => name.to_owned(),
            (None, None) => self.username.as_str().to_owned(),
        }
    }

    /// Returns `true` when the user may own new projects.
    #[must_use]
    pub fn can_create_projects(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Moves an inactive or suspended user back to [`UserStatus::Active`].
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::AlreadyActive`] when the user is active.
    pub fn activate(&mut self) -> Result<(), UserDomainError> {
        if self.status == UserStatus::Active {
            return Err(UserDomainError::AlreadyActive(self.id));
        }
        self.status = UserStatus::Active;
        Ok(())
    }

    /// Moves the user to [`UserStatus::Inactive`].
    ///
    /// `owned_projects` must be the complete, current set of projects owned
    /// by this user. Projects owned by someone else are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::AlreadyInactive`] when the user is inactive
    /// or [`UserDomainError::OwnsActiveProjects`] when any owned project is
    /// still active.
    pub fn deactivate(&mut self, owned_projects: &[Project]) -> Result<(), UserDomainError> {
        if self.status == UserStatus::Inactive {
            return Err(UserDomainError::AlreadyInactive(self.id));
        }

        let active_projects = owned_projects
            .iter()
            .filter(|project| project.owner_id() == self.id)
            .filter(|project| project.status() == ProjectStatus::Active)
            .count();
        if active_projects > 0 {
            return Err(UserDomainError::OwnsActiveProjects {
                user_id: self.id,
                active_projects,
            });
        }

        self.status = UserStatus::Inactive;
        Ok(())
    }

    /// Replaces the first and last name.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::NotActive`] unless the user is active.
    pub fn update_profile(
        &mut self,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Result<(), UserDomainError> {
        self.ensure_active()?;
        self.first_name = first_name;
        self.last_name = last_name;
        Ok(())
    }

    /// Replaces the stored secret after verifying the current one.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::NotActive`] unless the user is active,
    /// [`UserDomainError::IncorrectPassword`] when `current` does not match,
    /// [`UserDomainError::PasswordUnchanged`] when `new` equals the stored
    /// secret, or a weak-policy validation error for `new`.
    pub fn change_password(&mut self, current: &str, new: &str) -> Result<(), UserDomainError> {
        self.ensure_active()?;
        if self.password.expose_secret() != current {
            return Err(UserDomainError::IncorrectPassword);
        }
        if self.password.expose_secret() == new {
            return Err(UserDomainError::PasswordUnchanged);
        }
        self.password = Password::weak(new)?;
        Ok(())
    }

    /// Records the first successful insert.
    pub(crate) const fn stamp_created(&mut self, at: DateTime<Utc>) {
        self.created_at = Some(at);
        self.updated_at = Some(at);
        self.version = 1;
    }

    /// Records a persisted mutation and advances the revision.
    pub(crate) const fn stamp_updated(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
        self.version = self.version.saturating_add(1);
    }

    const fn ensure_active(&self) -> Result<(), UserDomainError> {
        match self.status {
            UserStatus::Active => Ok(()),
            status => Err(UserDomainError::NotActive {
                user_id: self.id,
                status,
            }),
        }
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
