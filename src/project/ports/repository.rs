//! Repository port for project aggregates.

use crate::error::ServiceErrorKind;
use crate::project::domain::{Project, ProjectId, ProjectStatus};
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Project persistence contract.
///
/// A project is stored together with its fully materialised task collection.
/// Loading a project always yields every task it owns.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project with its tasks and returns it stamped.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::DuplicateProject`] when the project
    /// identifier already exists.
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<Project>;

    /// Persists an existing project and its tasks.
    ///
    /// Tasks seen for the first time are stamped as created. Tasks whose
    /// state changed get a fresh `updated_at`. Tasks no longer present are
    /// dropped from storage.
    ///
    /// The write is accepted only when `project` was loaded at the revision
    /// currently stored; the returned project carries the next revision.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does not
    /// exist, or [`ProjectRepositoryError::VersionConflict`] when another
    /// write landed since `project` was loaded.
    async fn update(&self, project: &Project) -> ProjectRepositoryResult<Project>;

    /// Deletes a project and every task it owns. Returns `false` when no such
    /// project existed.
    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<bool>;

    /// Finds a project by identifier.
    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>>;

    /// Returns every project owned by the user.
    async fn find_by_owner(&self, owner_id: UserId) -> ProjectRepositoryResult<Vec<Project>>;

    /// Returns the user's projects in the given status.
    async fn find_by_owner_and_status(
        &self,
        owner_id: UserId,
        status: ProjectStatus,
    ) -> ProjectRepositoryResult<Vec<Project>>;

    /// Returns every project in the given status.
    async fn find_by_status(&self, status: ProjectStatus)
    -> ProjectRepositoryResult<Vec<Project>>;

    /// Returns projects whose name contains `fragment`, ignoring case.
    async fn search_by_name(&self, fragment: &str) -> ProjectRepositoryResult<Vec<Project>>;

    /// Returns projects whose description contains `fragment`, ignoring case.
    async fn search_by_description(&self, fragment: &str)
    -> ProjectRepositoryResult<Vec<Project>>;

    /// Counts projects owned by the user.
    async fn count_by_owner(&self, owner_id: UserId) -> ProjectRepositoryResult<usize>;

    /// Counts projects in the given status.
    async fn count_by_status(&self, status: ProjectStatus) -> ProjectRepositoryResult<usize>;
}

/// Errors returned by project repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// A project with the same identifier already exists.
    #[error("duplicate project identifier: {0}")]
    DuplicateProject(ProjectId),

    /// The project was not found.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// The update was based on a stale snapshot.
    #[error(
        "project {id} was modified concurrently: expected revision {expected}, found {found}"
    )]
    VersionConflict {
        /// Project being written.
        id: ProjectId,
        /// Revision currently stored.
        expected: u64,
        /// Revision the rejected write was based on.
        found: u64,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Classifies the failure for callers outside the storage boundary.
    #[must_use]
    pub const fn kind(&self) -> ServiceErrorKind {
        match self {
            Self::DuplicateProject(_) | Self::VersionConflict { .. } => {
                ServiceErrorKind::Conflict
            }
            Self::NotFound(_) => ServiceErrorKind::NotFound,
            Self::Persistence(_) => ServiceErrorKind::Internal,
        }
    }
}
