//! Read-only repository port for task queries.
//!
//! Tasks are written as part of their project aggregate. This port only
//! answers lookups across projects.

use crate::error::ServiceErrorKind;
use crate::project::domain::ProjectId;
use crate::task::domain::{Task, TaskId, TaskPriority, TaskStatus};
use crate::user::domain::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task query operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task lookup contract.
///
/// Text searches are case-insensitive substring matches. `find_due_before`
/// and `find_due_after` are strict, `find_due_between` is inclusive at both
/// ends, and tasks without a due date never match a date query.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskQueryRepository: Send + Sync {
    /// Finds a task by identifier.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns the tasks of a project.
    async fn find_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the tasks of a project in the given status.
    async fn find_by_project_and_status(
        &self,
        project_id: ProjectId,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns tasks assigned to the user.
    async fn find_by_assignee(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns tasks assigned to the user in the given status.
    async fn find_by_assignee_and_status(
        &self,
        user_id: UserId,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns tasks in the given status.
    async fn find_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns tasks with the given priority.
    async fn find_by_priority(&self, priority: TaskPriority) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns tasks due strictly before `instant`.
    async fn find_due_before(&self, instant: DateTime<Utc>) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns tasks due strictly after `instant`.
    async fn find_due_after(&self, instant: DateTime<Utc>) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns tasks due within `start..=end`.
    async fn find_due_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns tasks whose title contains `fragment`.
    async fn search_by_title(&self, fragment: &str) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns tasks whose description contains `fragment`.
    async fn search_by_description(&self, fragment: &str) -> TaskRepositoryResult<Vec<Task>>;

    /// Counts the tasks of a project.
    async fn count_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize>;

    /// Counts tasks in the given status.
    async fn count_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<usize>;

    /// Counts tasks assigned to the user.
    async fn count_by_assignee(&self, user_id: UserId) -> TaskRepositoryResult<usize>;
}

/// Errors returned by task query implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Classifies the failure for callers outside the storage boundary.
    #[must_use]
    pub const fn kind(&self) -> ServiceErrorKind {
        match self {
            Self::Persistence(_) => ServiceErrorKind::Internal,
        }
    }
}
