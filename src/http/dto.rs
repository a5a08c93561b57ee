//! JSON representations of domain entities.
//!
//! Entities never derive `Serialize` themselves; these views decide what is
//! exposed. Passwords are never serialised.

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use uuid::Uuid;

use crate::project::domain::{Project, ProjectStatus};
use crate::task::domain::{Task, TaskPriority, TaskStatus};
use crate::user::domain::{User, UserStatus};

/// User as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserResponse {
    /// Identifier.
    pub id: Uuid,
    /// Login name.
    pub username: String,
    /// Contact address.
    pub email: String,
    /// Optional first name.
    pub first_name: Option<String>,
    /// Optional last name.
    pub last_name: Option<String>,
    /// Display name.
    pub full_name: String,
    /// Account status.
    pub status: UserStatus,
    /// Creation instant.
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification instant.
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().into_inner(),
            username: user.username().as_str().to_owned(),
            email: user.email().as_str().to_owned(),
            first_name: user.first_name().map(str::to_owned),
            last_name: user.last_name().map(str::to_owned),
            full_name: user.full_name(),
            status: user.status(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

/// Task as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskResponse {
    /// Identifier.
    pub id: Uuid,
    /// Owning project, absent for a detached task.
    pub project_id: Option<Uuid>,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Workflow status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
    /// Optional deadline.
    pub due_date: Option<DateTime<Utc>>,
    /// Assigned user.
    pub assigned_to: Option<Uuid>,
    /// Whether the deadline has passed while the task is still open.
    pub overdue: bool,
    /// Whole days until the deadline.
    pub days_until_due: Option<i64>,
    /// Creation instant.
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification instant.
    pub updated_at: Option<DateTime<Utc>>,
}

impl TaskResponse {
    /// Builds the view, evaluating time-dependent fields against `clock`.
    #[must_use]
    pub fn new(task: &Task, clock: &impl Clock) -> Self {
        Self {
            id: task.id().into_inner(),
            project_id: task.project_id().map(|id| id.into_inner()),
            title: task.title().as_str().to_owned(),
            description: task.description().map(str::to_owned),
            status: task.status(),
            priority: task.priority(),
            due_date: task.due_date(),
            assigned_to: task.assigned_to().map(|id| id.into_inner()),
            overdue: task.is_overdue(clock),
            days_until_due: task.days_until_due(clock),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }

    /// Builds views for a list of tasks.
    #[must_use]
    pub fn list(tasks: &[Task], clock: &impl Clock) -> Vec<Self> {
        tasks.iter().map(|task| Self::new(task, clock)).collect()
    }
}

/// Project as returned by the API, including its tasks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectResponse {
    /// Identifier.
    pub id: Uuid,
    /// Name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: ProjectStatus,
    /// Owning user.
    pub owner_id: Uuid,
    /// Number of tasks.
    pub total_tasks: usize,
    /// Number of completed tasks.
    pub completed_tasks: usize,
    /// Number of open tasks.
    pub pending_tasks: usize,
    /// Completed share in percent.
    pub progress: f64,
    /// Tasks in insertion order.
    pub tasks: Vec<TaskResponse>,
    /// Creation instant.
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification instant.
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProjectResponse {
    /// Builds the view, evaluating task deadlines against `clock`.
    #[must_use]
    pub fn new(project: &Project, clock: &impl Clock) -> Self {
        Self {
            id: project.id().into_inner(),
            name: project.name().as_str().to_owned(),
            description: project.description().map(str::to_owned),
            status: project.status(),
            owner_id: project.owner_id().into_inner(),
            total_tasks: project.total_tasks(),
            completed_tasks: project.completed_tasks(),
            pending_tasks: project.pending_tasks(),
            progress: project.progress(),
            tasks: TaskResponse::list(project.tasks(), clock),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
        }
    }
}
