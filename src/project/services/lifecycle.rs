//! Service layer for project creation and lifecycle transitions.

use crate::error::ServiceErrorKind;
use crate::project::{
    domain::{Project, ProjectDomainError, ProjectId, ProjectStatus},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::user::{
    domain::UserId,
    ports::{UserRepository, UserRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    owner_id: UserId,
    name: String,
    description: Option<String>,
}

impl CreateProjectRequest {
    /// Creates a request for a project owned by `owner_id`.
    #[must_use]
    pub fn new(owner_id: UserId, name: impl Into<String>) -> Self {
        Self {
            owner_id,
            name: name.into(),
            description: None,
        }
    }

    /// Sets the project description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Service-level errors for project lifecycle operations.
#[derive(Debug, Error)]
pub enum ProjectLifecycleError {
    /// Domain validation or a lifecycle rule failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),

    /// Project repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),

    /// Loading the owner failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),

    /// No project exists with the identifier.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// No user exists with the owner identifier.
    #[error("owner not found: {0}")]
    OwnerNotFound(UserId),
}

impl ProjectLifecycleError {
    /// Classifies the error for transport mapping.
    #[must_use]
    pub fn kind(&self) -> ServiceErrorKind {
        match self {
            Self::Domain(err) => err.kind().into(),
            Self::Repository(err) => err.kind(),
            Self::Users(err) => err.kind(),
            Self::NotFound(_) | Self::OwnerNotFound(_) => ServiceErrorKind::NotFound,
        }
    }
}

/// Result type for project lifecycle service operations.
pub type ProjectLifecycleResult<T> = Result<T, ProjectLifecycleError>;

/// Project lifecycle orchestration service.
pub struct ProjectLifecycleService<P, U>
where
    P: ProjectRepository,
    U: UserRepository,
{
    projects: Arc<P>,
    users: Arc<U>,
}

impl<P, U> Clone for ProjectLifecycleService<P, U>
where
    P: ProjectRepository,
    U: UserRepository,
{
    fn clone(&self) -> Self {
        Self {
            projects: Arc::clone(&self.projects),
            users: Arc::clone(&self.users),
        }
    }
}

impl<P, U> ProjectLifecycleService<P, U>
where
    P: ProjectRepository,
    U: UserRepository,
{
    /// Creates a new project lifecycle service.
    #[must_use]
    pub const fn new(projects: Arc<P>, users: Arc<U>) -> Self {
        Self { projects, users }
    }

    /// Creates an active project for an active owner.
    ///
    /// After the project is stored the owner snapshot it was checked against
    /// is written back at the same revision. A concurrent deactivation
    /// therefore either sees the new project or makes this call fail with a
    /// version conflict, in which case the project is removed again.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::OwnerNotFound`] for an unknown owner,
    /// [`ProjectLifecycleError::Domain`] when the name is invalid or the owner
    /// cannot create projects, or a repository error.
    #[instrument(skip(self, request), fields(owner_id = %request.owner_id))]
    pub async fn create_project(
        &self,
        request: CreateProjectRequest,
    ) -> ProjectLifecycleResult<Project> {
        let owner = self
            .users
            .find_by_id(request.owner_id)
            .await?
            .ok_or(ProjectLifecycleError::OwnerNotFound(request.owner_id))?;
        let project = Project::new(&request.name, request.description, &owner)
            .inspect_err(|err| debug!(%err, "project creation rejected"))?;
        let stored = self.projects.store(&project).await?;

        if let Err(err) = self.users.update(&owner).await {
            warn!(%err, project_id = %stored.id(), "owner changed during creation");
            self.projects.delete(stored.id()).await?;
            return Err(err.into());
        }

        info!(project_id = %stored.id(), "created project");
        Ok(stored)
    }

    /// Retrieves a project with its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::Repository`] when the lookup fails.
    pub async fn find_by_id(&self, id: ProjectId) -> ProjectLifecycleResult<Option<Project>> {
        Ok(self.projects.find_by_id(id).await?)
    }

    /// Lists projects owned by a user, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::Repository`] when the lookup fails.
    pub async fn list_for_owner(
        &self,
        owner_id: UserId,
        status: Option<ProjectStatus>,
    ) -> ProjectLifecycleResult<Vec<Project>> {
        let projects = match status {
            Some(filter) => {
                self.projects
                    .find_by_owner_and_status(owner_id, filter)
                    .await?
            }
            None => self.projects.find_by_owner(owner_id).await?,
        };
        Ok(projects)
    }

    /// Renames an active project and replaces its description.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::NotFound`] for an unknown project or
    /// [`ProjectLifecycleError::Domain`] when the project is not active or
    /// the name is invalid.
    #[instrument(skip(self, name, description), fields(project_id = %id))]
    pub async fn update_project(
        &self,
        id: ProjectId,
        name: &str,
        description: Option<String>,
    ) -> ProjectLifecycleResult<Project> {
        self.mutate(id, "updated project", |project| {
            project.update_project(name, description)
        })
        .await
    }

    /// Completes a project whose tasks are all closed.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::NotFound`] for an unknown project or
    /// [`ProjectLifecycleError::Domain`] when the project is not active or
    /// still has open tasks.
    #[instrument(skip(self), fields(project_id = %id))]
    pub async fn complete(&self, id: ProjectId) -> ProjectLifecycleResult<Project> {
        self.mutate(id, "completed project", Project::complete).await
    }

    /// Archives a completed project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::NotFound`] for an unknown project or
    /// [`ProjectLifecycleError::Domain`] unless the project is completed.
    #[instrument(skip(self), fields(project_id = %id))]
    pub async fn archive(&self, id: ProjectId) -> ProjectLifecycleResult<Project> {
        self.mutate(id, "archived project", Project::archive).await
    }

    /// Returns an archived project to active.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::NotFound`] for an unknown project or
    /// [`ProjectLifecycleError::Domain`] unless the project is archived.
    #[instrument(skip(self), fields(project_id = %id))]
    pub async fn reactivate(&self, id: ProjectId) -> ProjectLifecycleResult<Project> {
        self.mutate(id, "reactivated project", Project::reactivate)
            .await
    }

    /// Deletes a project together with its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::NotFound`] for an unknown project.
    #[instrument(skip(self), fields(project_id = %id))]
    pub async fn delete(&self, id: ProjectId) -> ProjectLifecycleResult<()> {
        if !self.projects.delete(id).await? {
            return Err(ProjectLifecycleError::NotFound(id));
        }
        info!("deleted project");
        Ok(())
    }

    async fn mutate(
        &self,
        id: ProjectId,
        outcome: &'static str,
        operation: impl FnOnce(&mut Project) -> Result<(), ProjectDomainError> + Send,
    ) -> ProjectLifecycleResult<Project> {
        let mut project = self
            .projects
            .find_by_id(id)
            .await?
            .ok_or(ProjectLifecycleError::NotFound(id))?;
        operation(&mut project).inspect_err(|err| debug!(%err, "project change rejected"))?;
        let stored = self.projects.update(&project).await?;
        info!(status = %stored.status(), "{outcome}");
        Ok(stored)
    }
}
