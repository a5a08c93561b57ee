//! Task entity and task lifecycle status.

use super::{ParseTaskStatusError, TaskDomainError, TaskId, TaskPriority, TaskTitle};
use crate::project::domain::{Project, ProjectId};
use crate::user::domain::{User, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been created but work has not started.
    Todo,
    /// Task is being worked on.
    InProgress,
    /// Task has been finished.
    Completed,
    /// Task has been dropped. It can be reopened.
    Cancelled,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns `true` for tasks still to do or in progress.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Todo | Self::InProgress)
    }

    /// Returns `true` for completed or cancelled tasks.
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task entity.
///
/// A task belongs to exactly one project through `project_id`, except after
/// [`Project::remove_task`], which hands back a task without a project.
///
/// Equality and hashing are defined by identifier only.
#[derive(Debug, Clone)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<DateTime<Utc>>,
    project_id: Option<ProjectId>,
    assigned_to: Option<UserId>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Owning project, if any.
    pub project_id: Option<ProjectId>,
    /// Assigned user, if any.
    pub assigned_to: Option<UserId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a to-do task for `project` with medium priority.
    ///
    /// The task is not yet part of the project's collection; pass it to
    /// [`Project::add_task`].
    ///
    /// # Errors
    ///
    /// Returns a title validation error, or
    /// [`TaskDomainError::ProjectNotAcceptingTasks`] when the project is not
    /// active.
    pub fn new(
        project: &Project,
        title: &str,
        description: Option<String>,
        assignee: Option<&User>,
    ) -> Result<Self, TaskDomainError> {
        let validated_title = TaskTitle::new(title)?;
        if !project.can_accept_tasks() {
            return Err(TaskDomainError::ProjectNotAcceptingTasks {
                project_id: project.id(),
                status: project.status(),
            });
        }

        Ok(Self {
            id: TaskId::new(),
            title: validated_title,
            description,
            status: TaskStatus::Todo,
            priority: TaskPriority::default(),
            due_date: None,
            project_id: Some(project.id()),
            assigned_to: assignee.map(User::id),
            created_at: None,
            updated_at: None,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            due_date: data.due_date,
            project_id: data.project_id,
            assigned_to: data.assigned_to,
            created_at: Some(data.created_at),
            updated_at: Some(data.updated_at),
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the owning project, or `None` for a removed task.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    /// Returns the assigned user, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<UserId> {
        self.assigned_to
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

    /// Returns `true` once storage has recorded the first insert.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.created_at.is_some()
    }

    /// Returns `true` unless the task is completed or cancelled.
    #[must_use]
    pub const fn can_be_edited(&self) -> bool {
        !self.status.is_closed()
    }

    /// Returns `true` unless the task is completed or cancelled.
    #[must_use]
    pub const fn can_be_assigned(&self) -> bool {
        !self.status.is_closed()
    }

    /// Replaces title and description of an open task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotEditable`] for a closed task, or a title
    /// validation error.
    pub fn update_task(
        &mut self,
        title: &str,
        description: Option<String>,
    ) -> Result<(), TaskDomainError> {
        if !self.can_be_edited() {
            return Err(TaskDomainError::NotEditable {
                task_id: self.id,
                status: self.status,
            });
        }
        self.title = TaskTitle::new(title)?;
        self.description = description;
        Ok(())
    }

    /// Moves a to-do task into progress.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] unless the task is
    /// [`TaskStatus::Todo`].
    pub fn start(&mut self) -> Result<(), TaskDomainError> {
        self.transition(TaskStatus::Todo, TaskStatus::InProgress)
    }

    /// Completes a task that is in progress.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] unless the task is
    /// [`TaskStatus::InProgress`].
    pub fn complete(&mut self) -> Result<(), TaskDomainError> {
        self.transition(TaskStatus::InProgress, TaskStatus::Completed)
    }

    /// Cancels any task that is not completed.
    ///
    /// Cancelling a cancelled task succeeds and leaves it cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] for a completed task.
    pub fn cancel(&mut self) -> Result<(), TaskDomainError> {
        if self.status == TaskStatus::Completed {
            return Err(self.invalid_transition(TaskStatus::Cancelled));
        }
        self.status = TaskStatus::Cancelled;
        Ok(())
    }

    /// Returns a cancelled task to to-do.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] unless the task is
    /// [`TaskStatus::Cancelled`].
    pub fn reopen(&mut self) -> Result<(), TaskDomainError> {
        self.transition(TaskStatus::Cancelled, TaskStatus::Todo)
    }

    /// Assigns an open task to `user`, replacing any previous assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotAssignable`] for a closed task.
    pub fn assign_to(&mut self, user: &User) -> Result<(), TaskDomainError> {
        if !self.can_be_assigned() {
            return Err(TaskDomainError::NotAssignable {
                task_id: self.id,
                status: self.status,
            });
        }
        self.assigned_to = Some(user.id());
        Ok(())
    }

    /// Clears the assignee in any status.
    pub const fn unassign(&mut self) {
        self.assigned_to = None;
    }

    /// Sets the priority in any status.
    pub const fn change_priority(&mut self, priority: TaskPriority) {
        self.priority = priority;
    }

    /// Sets or clears the due date.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DueDateInPast`] when `due_date` lies before
    /// the clock's current time.
    pub fn update_due_date(
        &mut self,
        due_date: Option<DateTime<Utc>>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if let Some(due) = due_date
            && due < clock.utc()
        {
            return Err(TaskDomainError::DueDateInPast);
        }
        self.due_date = due_date;
        Ok(())
    }

    /// Returns `true` when an open task's due date has passed.
    #[must_use]
    pub fn is_overdue(&self, clock: &impl Clock) -> bool {
        !self.status.is_closed() && self.due_date.is_some_and(|due| due < clock.utc())
    }

    /// Returns whole days elapsed since the task was first stored, or `0`
    /// for an unsaved task.
    #[must_use]
    pub fn days_since_creation(&self, clock: &impl Clock) -> i64 {
        self.created_at
            .map_or(0, |created| (clock.utc() - created).num_days())
    }

    /// Returns whole days until the due date, negative once it has passed.
    #[must_use]
    pub fn days_until_due(&self, clock: &impl Clock) -> Option<i64> {
        self.due_date.map(|due| (due - clock.utc()).num_days())
    }

    /// Sets the owning project.
    pub(crate) const fn attach_to(&mut self, project_id: ProjectId) {
        self.project_id = Some(project_id);
    }

    /// Clears the owning project.
    pub(crate) const fn detach(&mut self) {
        self.project_id = None;
    }

    /// Returns `true` when any domain field differs from `other`.
    pub(crate) fn differs_from(&self, other: &Self) -> bool {
        self.title != other.title
            || self.description != other.description
            || self.status != other.status
            || self.priority != other.priority
            || self.due_date != other.due_date
            || self.project_id != other.project_id
            || self.assigned_to != other.assigned_to
    }

    /// Records the first successful insert.
    pub(crate) const fn stamp_created(&mut self, at: DateTime<Utc>) {
        self.created_at = Some(at);
        self.updated_at = Some(at);
    }

    /// Records a persisted mutation.
    pub(crate) const fn stamp_updated(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }

    fn transition(&mut self, from: TaskStatus, to: TaskStatus) -> Result<(), TaskDomainError> {
        if self.status != from {
            return Err(self.invalid_transition(to));
        }
        self.status = to;
        Ok(())
    }

    const fn invalid_transition(&self, to: TaskStatus) -> TaskDomainError {
        TaskDomainError::InvalidTransition {
            task_id: self.id,
            from: self.status,
            to,
        }
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Task {}

impl Hash for Task {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
