//! Error types for project domain validation and lifecycle rules.

use super::{ProjectId, ProjectStatus};
use crate::error::ErrorKind;
use crate::user::domain::UserId;
use thiserror::Error;

/// Errors returned while constructing or mutating projects.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyName,

    /// The project name is outside the 3 to 100 character range.
    #[error("project name '{0}' must be between 3 and 100 characters")]
    InvalidNameLength(String),

    /// The prospective owner is not allowed to create projects.
    #[error("user {0} cannot create projects")]
    OwnerCannotCreateProjects(UserId),

    /// The project is not active and cannot be edited.
    #[error("project {project_id} is {status} and cannot be edited")]
    NotEditable {
        /// Project identifier.
        project_id: ProjectId,
        /// Current lifecycle status.
        status: ProjectStatus,
    },

    /// The project is already completed.
    #[error("project {0} is already completed")]
    AlreadyCompleted(ProjectId),

    /// An archived project cannot be completed.
    #[error("project {0} is archived and cannot be completed")]
    ArchivedCannotComplete(ProjectId),

    /// Some tasks are still to do or in progress.
    #[error("project {project_id} has {pending} incomplete task(s)")]
    IncompleteTasks {
        /// Project identifier.
        project_id: ProjectId,
        /// Number of tasks still to do or in progress.
        pending: usize,
    },

    /// The project is already archived.
    #[error("project {0} is already archived")]
    AlreadyArchived(ProjectId),

    /// Only completed projects can be archived.
    #[error("project {project_id} is {status}, only completed projects can be archived")]
    ArchiveRequiresCompleted {
        /// Project identifier.
        project_id: ProjectId,
        /// Current lifecycle status.
        status: ProjectStatus,
    },

    /// Only archived projects can be reactivated.
    #[error("project {project_id} is {status}, only archived projects can be reactivated")]
    ReactivateRequiresArchived {
        /// Project identifier.
        project_id: ProjectId,
        /// Current lifecycle status.
        status: ProjectStatus,
    },

    /// The project does not accept new tasks in its current status.
    #[error("project {project_id} is {status} and does not accept tasks")]
    NotAcceptingTasks {
        /// Project identifier.
        project_id: ProjectId,
        /// Current lifecycle status.
        status: ProjectStatus,
    },
}

impl ProjectDomainError {
    /// Classifies the error into one of the three domain failure kinds.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyName | Self::InvalidNameLength(_) => ErrorKind::InvalidArgument,
            Self::OwnerCannotCreateProjects(_) | Self::IncompleteTasks { .. } => {
                ErrorKind::InvariantViolation
            }
            Self::NotEditable { .. }
            | Self::AlreadyCompleted(_)
            | Self::ArchivedCannotComplete(_)
            | Self::AlreadyArchived(_)
            | Self::ArchiveRequiresCompleted { .. }
            | Self::ReactivateRequiresArchived { .. }
            | Self::NotAcceptingTasks { .. } => ErrorKind::InvalidState,
        }
    }
}

/// Error returned while parsing project status from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown project status: {0}")]
pub struct ParseProjectStatusError(pub String);
