//! Service layer for task creation, editing and status transitions.
//!
//! Every mutation loads the owning project, changes the task inside that
//! aggregate and persists the project as a whole.

use crate::error::ServiceErrorKind;
use crate::project::{
    domain::{Project, ProjectDomainError, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::task::{
    domain::{Task, TaskDomainError, TaskId, TaskPriority, TaskStatus},
    ports::{TaskQueryRepository, TaskRepositoryError},
};
use crate::user::{
    domain::{User, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Request payload for creating a task inside a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    title: String,
    description: Option<String>,
    priority: Option<TaskPriority>,
    due_date: Option<DateTime<Utc>>,
    assignee_id: Option<UserId>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
            description: None,
            priority: None,
            due_date: None,
            assignee_id: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Overrides the default medium priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Assigns the new task to a user.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }
}

/// Named status transition applied by [`TaskWorkflowService::transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskTransition {
    /// To-do to in progress.
    Start,
    /// In progress to completed.
    Complete,
    /// Anything but completed to cancelled.
    Cancel,
    /// Cancelled back to to-do.
    Reopen,
}

impl TaskTransition {
    /// Returns the transition name used in routes and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Complete => "complete",
            Self::Cancel => "cancel",
            Self::Reopen => "reopen",
        }
    }

    fn apply(self, task: &mut Task) -> Result<(), TaskDomainError> {
        match self {
            Self::Start => task.start(),
            Self::Complete => task.complete(),
            Self::Cancel => task.cancel(),
            Self::Reopen => task.reopen(),
        }
    }
}

impl fmt::Display for TaskTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service-level errors for task workflow operations.
#[derive(Debug, Error)]
pub enum TaskWorkflowError {
    /// A task rule failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The owning project rejected the change.
    #[error(transparent)]
    Project(#[from] ProjectDomainError),

    /// Persisting or loading the owning project failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),

    /// A task query failed.
    #[error(transparent)]
    Query(#[from] TaskRepositoryError),

    /// Loading a user failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),

    /// No task exists with the identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// No project exists with the identifier.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// No user exists with the identifier.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
}

impl TaskWorkflowError {
    /// Classifies the error for transport mapping.
    #[must_use]
    pub fn kind(&self) -> ServiceErrorKind {
        match self {
            Self::Domain(err) => err.kind().into(),
            Self::Project(err) => err.kind().into(),
            Self::Repository(err) => err.kind(),
            Self::Query(err) => err.kind(),
            Self::Users(err) => err.kind(),
            Self::NotFound(_) | Self::ProjectNotFound(_) | Self::UserNotFound(_) => {
                ServiceErrorKind::NotFound
            }
        }
    }
}

/// Result type for task workflow service operations.
pub type TaskWorkflowResult<T> = Result<T, TaskWorkflowError>;

/// Task workflow orchestration service.
///
/// `P` persists project aggregates, `Q` answers task lookups, `U` resolves
/// assignees and `C` supplies the current time for due-date rules.
pub struct TaskWorkflowService<P, Q, U, C>
where
    P: ProjectRepository,
    Q: TaskQueryRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    tasks: Arc<Q>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<P, Q, U, C> Clone for TaskWorkflowService<P, Q, U, C>
where
    P: ProjectRepository,
    Q: TaskQueryRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            projects: Arc::clone(&self.projects),
            tasks: Arc::clone(&self.tasks),
            users: Arc::clone(&self.users),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<P, Q, U, C> TaskWorkflowService<P, Q, U, C>
where
    P: ProjectRepository,
    Q: TaskQueryRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task workflow service.
    #[must_use]
    pub const fn new(projects: Arc<P>, tasks: Arc<Q>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            projects,
            tasks,
            users,
            clock,
        }
    }

    /// Creates a task and adds it to its project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::ProjectNotFound`] or
    /// [`TaskWorkflowError::UserNotFound`] for unknown references,
    /// [`TaskWorkflowError::Domain`] when the title or due date is invalid or
    /// the project does not accept tasks, or a repository error.
    #[instrument(skip(self, request), fields(project_id = %request.project_id))]
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskWorkflowResult<Task> {
        let mut project = self.load_project(request.project_id).await?;
        let assignee = match request.assignee_id {
            Some(user_id) => Some(self.load_user(user_id).await?),
            None => None,
        };

        let mut task = Task::new(
            &project,
            &request.title,
            request.description,
            assignee.as_ref(),
        )
        .inspect_err(|err| debug!(%err, "task creation rejected"))?;
        if let Some(priority) = request.priority {
            task.change_priority(priority);
        }
        task.update_due_date(request.due_date, &*self.clock)?;

        let task_id = task.id();
        project.add_task(task)?;
        let stored = self.projects.update(&project).await?;
        info!(%task_id, "created task");
        stored
            .task(task_id)
            .cloned()
            .ok_or(TaskWorkflowError::NotFound(task_id))
    }

    /// Replaces the title and description of an open task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::NotFound`] for an unknown task or
    /// [`TaskWorkflowError::Domain`] when the task is closed or the title is
    /// invalid.
    #[instrument(skip(self, title, description), fields(task_id = %id))]
    pub async fn update_task(
        &self,
        id: TaskId,
        title: &str,
        description: Option<String>,
    ) -> TaskWorkflowResult<Task> {
        self.mutate(id, |task| task.update_task(title, description))
            .await
    }

    /// Applies a named status transition.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::NotFound`] for an unknown task or
    /// [`TaskWorkflowError::Domain`] when the transition is not permitted
    /// from the current status.
    #[instrument(skip(self, transition), fields(task_id = %id, transition = %transition))]
    pub async fn transition(
        &self,
        id: TaskId,
        transition: TaskTransition,
    ) -> TaskWorkflowResult<Task> {
        self.mutate(id, |task| transition.apply(task)).await
    }

    /// Changes the priority in any status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::NotFound`] for an unknown task.
    #[instrument(skip(self, priority), fields(task_id = %id, priority = %priority))]
    pub async fn change_priority(
        &self,
        id: TaskId,
        priority: TaskPriority,
    ) -> TaskWorkflowResult<Task> {
        self.mutate(id, |task| {
            task.change_priority(priority);
            Ok(())
        })
        .await
    }

    /// Sets or clears the due date.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::NotFound`] for an unknown task or
    /// [`TaskWorkflowError::Domain`] when the date is in the past.
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn update_due_date(
        &self,
        id: TaskId,
        due_date: Option<DateTime<Utc>>,
    ) -> TaskWorkflowResult<Task> {
        let clock = Arc::clone(&self.clock);
        self.mutate(id, |task| task.update_due_date(due_date, &*clock))
            .await
    }

    /// Assigns an open task to a user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::NotFound`] or
    /// [`TaskWorkflowError::UserNotFound`] for unknown references, or
    /// [`TaskWorkflowError::Domain`] when the task is closed.
    #[instrument(skip(self, user_id), fields(task_id = %id, user_id = %user_id))]
    pub async fn assign(&self, id: TaskId, user_id: UserId) -> TaskWorkflowResult<Task> {
        let user = self.load_user(user_id).await?;
        self.mutate(id, |task| task.assign_to(&user)).await
    }

    /// Clears the assignee in any status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::NotFound`] for an unknown task.
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn unassign(&self, id: TaskId) -> TaskWorkflowResult<Task> {
        self.mutate(id, |task| {
            task.unassign();
            Ok(())
        })
        .await
    }

    /// Removes a task from its project and returns it without a project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::NotFound`] for an unknown task.
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn remove_task(&self, id: TaskId) -> TaskWorkflowResult<Task> {
        let mut project = self.owning_project(id).await?;
        let removed = project
            .remove_task(id)
            .ok_or(TaskWorkflowError::NotFound(id))?;
        self.projects.update(&project).await?;
        info!(project_id = %project.id(), "removed task from project");
        Ok(removed)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Query`] when the lookup fails.
    pub async fn find_by_id(&self, id: TaskId) -> TaskWorkflowResult<Option<Task>> {
        Ok(self.tasks.find_by_id(id).await?)
    }

    /// Lists the tasks of a project, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Query`] when the lookup fails.
    pub async fn list_for_project(
        &self,
        project_id: ProjectId,
        status: Option<TaskStatus>,
    ) -> TaskWorkflowResult<Vec<Task>> {
        let tasks = match status {
            Some(filter) => {
                self.tasks
                    .find_by_project_and_status(project_id, filter)
                    .await?
            }
            None => self.tasks.find_by_project(project_id).await?,
        };
        Ok(tasks)
    }

    /// Lists tasks assigned to a user, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Query`] when the lookup fails.
    pub async fn list_for_assignee(
        &self,
        user_id: UserId,
        status: Option<TaskStatus>,
    ) -> TaskWorkflowResult<Vec<Task>> {
        let tasks = match status {
            Some(filter) => {
                self.tasks
                    .find_by_assignee_and_status(user_id, filter)
                    .await?
            }
            None => self.tasks.find_by_assignee(user_id).await?,
        };
        Ok(tasks)
    }

    /// Lists open tasks whose due date has passed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Query`] when the lookup fails.
    pub async fn list_overdue(&self) -> TaskWorkflowResult<Vec<Task>> {
        let now = self.clock.utc();
        let candidates = self.tasks.find_due_before(now).await?;
        Ok(candidates
            .into_iter()
            .filter(|task| task.is_overdue(&*self.clock))
            .collect())
    }

    async fn mutate(
        &self,
        id: TaskId,
        operation: impl FnOnce(&mut Task) -> Result<(), TaskDomainError> + Send,
    ) -> TaskWorkflowResult<Task> {
        let mut project = self.owning_project(id).await?;
        let task = project
            .task_mut(id)
            .ok_or(TaskWorkflowError::NotFound(id))?;
        operation(task).inspect_err(|err| debug!(%err, "task change rejected"))?;

        let stored = self.projects.update(&project).await?;
        let updated = stored
            .task(id)
            .cloned()
            .ok_or(TaskWorkflowError::NotFound(id))?;
        info!(status = %updated.status(), "updated task");
        Ok(updated)
    }

    async fn owning_project(&self, id: TaskId) -> TaskWorkflowResult<Project> {
        let task = self
            .tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskWorkflowError::NotFound(id))?;
        let project_id = task.project_id().ok_or(TaskWorkflowError::NotFound(id))?;
        self.load_project(project_id).await
    }

    async fn load_project(&self, id: ProjectId) -> TaskWorkflowResult<Project> {
        self.projects
            .find_by_id(id)
            .await?
            .ok_or(TaskWorkflowError::ProjectNotFound(id))
    }

    async fn load_user(&self, id: UserId) -> TaskWorkflowResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(TaskWorkflowError::UserNotFound(id))
    }
}
