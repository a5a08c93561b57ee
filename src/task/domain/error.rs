//! Error types for task domain validation, parsing and lifecycle rules.

use super::{TaskId, TaskStatus};
use crate::error::ErrorKind;
use crate::project::domain::{ProjectId, ProjectStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating tasks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The trimmed title is too short.
    #[error("task title must be at least {minimum} characters long")]
    TitleTooShort {
        /// Minimum number of characters.
        minimum: usize,
    },

    /// The trimmed title is too long.
    #[error("task title must be at most {maximum} characters long")]
    TitleTooLong {
        /// Maximum number of characters.
        maximum: usize,
    },

    /// The due date lies before the current time.
    #[error("due date cannot be in the past")]
    DueDateInPast,

    /// The target project does not accept new tasks.
    #[error("project {project_id} is {status} and cannot accept new tasks")]
    ProjectNotAcceptingTasks {
        /// Project identifier.
        project_id: ProjectId,
        /// Current project status.
        status: ProjectStatus,
    },

    /// Title and description are frozen once a task is closed.
    #[error("task {task_id} is {status} and cannot be edited")]
    NotEditable {
        /// Task identifier.
        task_id: TaskId,
        /// Current task status.
        status: TaskStatus,
    },

    /// Assignment is frozen once a task is closed.
    #[error("task {task_id} is {status} and cannot be assigned")]
    NotAssignable {
        /// Task identifier.
        task_id: TaskId,
        /// Current task status.
        status: TaskStatus,
    },

    /// The requested status transition is not permitted.
    #[error("cannot transition task {task_id} from {from} to {to}")]
    InvalidTransition {
        /// Task identifier.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },
}

impl TaskDomainError {
    /// Classifies the error into one of the three domain failure kinds.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyTitle
            | Self::TitleTooShort { .. }
            | Self::TitleTooLong { .. }
            | Self::DueDateInPast => ErrorKind::InvalidArgument,
            Self::ProjectNotAcceptingTasks { .. } => ErrorKind::InvariantViolation,
            Self::NotEditable { .. }
            | Self::NotAssignable { .. }
            | Self::InvalidTransition { .. } => ErrorKind::InvalidState,
        }
    }
}

/// Error returned while parsing task status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priority.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
