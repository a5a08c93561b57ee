//! Project aggregate root and its task collection.

use super::{ProjectDomainError, ProjectId, ProjectName, ProjectStatus};
use crate::task::domain::{Task, TaskId, TaskStatus};
use crate::user::domain::{User, UserId};
use chrono::{DateTime, Utc};
use std::hash::{Hash, Hasher};

/// Project aggregate root.
///
/// A project exclusively owns its tasks. Each owned task carries the
/// project's identifier as its back-reference, and status transitions are
/// gated on the completion state of the owned tasks.
///
/// Equality and hashing are defined by identifier only.
#[derive(Debug, Clone)]
pub struct Project {
    id: ProjectId,
    name: ProjectName,
    description: Option<String>,
    status: ProjectStatus,
    owner_id: UserId,
    tasks: Vec<Task>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    version: u64,
}

/// Parameter object for reconstructing a persisted project aggregate.
#[derive(Debug, Clone)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted project name.
    pub name: ProjectName,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted lifecycle status.
    pub status: ProjectStatus,
    /// Owning user.
    pub owner_id: UserId,
    /// Fully materialised task collection.
    pub tasks: Vec<Task>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Revision counter assigned by storage.
    pub version: u64,
}

impl Project {
    /// Creates a new active project owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns a name validation error, or
    /// [`ProjectDomainError::OwnerCannotCreateProjects`] when the owner is not
    /// active.
    ///
    /// # Examples
    ///
    ///     use taskflow::project::domain::{Project, ProjectStatus};
    ///     use taskflow::user::domain::User;
    ///
    ///     let owner = User::new("alice123", "alice@x.com", "secret1", None, None)?;
    ///     let project = Project::new("Roadmap", None, &owner)?;
    ///     assert_eq!(project.status(), ProjectStatus::Active);
    ///     assert_eq!(project.owner_id(), owner.id());
    ///     # Ok::<(), Box<dyn std::error::Error>>(())
    pub fn new(
        name: &str,
        description: Option<String>,
        owner: &User,
    ) -> Result<Self, ProjectDomainError> {
        let validated_name = ProjectName::new(name)?;
        if !owner.can_create_projects() {
            return Err(ProjectDomainError::OwnerCannotCreateProjects(owner.id()));
        }

        Ok(Self {
            id: ProjectId::new(),
            name: validated_name,
            description,
            status: ProjectStatus::Active,
            owner_id: owner.id(),
            tasks: Vec::new(),
            created_at: None,
            updated_at: None,
            version: 0,
        })
    }

    /// Reconstructs a project from persisted storage.
    ///
    /// The task collection is taken as stored; back-references are not
    /// rewritten.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            status: data.status,
            owner_id: data.owner_id,
            tasks: data.tasks,
            created_at: Some(data.created_at),
            updated_at: Some(data.updated_at),
            version: data.version,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the owned tasks in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the owned task with the given identifier.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns a mutable handle to an owned task.
    ///
    /// Task-level rules still apply through the task's own operations.
    pub fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id() == id)
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

    /// Returns `true` while name and description may change.
    #[must_use]
    pub fn can_be_edited(&self) -> bool {
        self.status == ProjectStatus::Active
    }

    /// Returns `true` while new tasks may be added.
    #[must_use]
    pub fn can_accept_tasks(&self) -> bool {
        self.status == ProjectStatus::Active
    }

    /// Replaces the name and description of an active project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::NotEditable`] unless the project is
    /// active, or a name validation error.
    pub fn update_project(
        &mut self,
        name: &str,
        description: Option<String>,
    ) -> Result<(), ProjectDomainError> {
        if !self.can_be_edited() {
            return Err(ProjectDomainError::NotEditable {
                project_id: self.id,
                status: self.status,
            });
        }
        self.name = ProjectName::new(name)?;
        self.description = description;
        Ok(())
    }

    /// Marks the project completed once no task is left to do or in progress.
    ///
    /// A project without tasks can be completed.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::AlreadyCompleted`],
    /// [`ProjectDomainError::ArchivedCannotComplete`] or
    /// [`ProjectDomainError::IncompleteTasks`].
    pub fn complete(&mut self) -> Result<(), ProjectDomainError> {
        match self.status {
            ProjectStatus::Completed => Err(ProjectDomainError::AlreadyCompleted(self.id)),
            ProjectStatus::Archived => Err(ProjectDomainError::ArchivedCannotComplete(self.id)),
            ProjectStatus::Active => {
                let pending = self.pending_tasks();
                if pending > 0 {
                    return Err(ProjectDomainError::IncompleteTasks {
                        project_id: self.id,
                        pending,
                    });
                }
                self.status = ProjectStatus::Completed;
                Ok(())
            }
        }
    }

    /// Archives a completed project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::AlreadyArchived`] or
    /// [`ProjectDomainError::ArchiveRequiresCompleted`].
    pub fn archive(&mut self) -> Result<(), ProjectDomainError> {
        match self.status {
            ProjectStatus::Archived => Err(ProjectDomainError::AlreadyArchived(self.id)),
            ProjectStatus::Active => Err(ProjectDomainError::ArchiveRequiresCompleted {
                project_id: self.id,
                status: self.status,
            }),
            ProjectStatus::Completed => {
                self.status = ProjectStatus::Archived;
                Ok(())
            }
        }
    }

    /// Returns an archived project straight to active.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::ReactivateRequiresArchived`] unless the
    /// project is archived.
    pub fn reactivate(&mut self) -> Result<(), ProjectDomainError> {
        if self.status != ProjectStatus::Archived {
            return Err(ProjectDomainError::ReactivateRequiresArchived {
                project_id: self.id,
                status: self.status,
            });
        }
        self.status = ProjectStatus::Active;
        Ok(())
    }

    /// Adds a task and points its back-reference at this project.
    ///
    /// Adding a task whose identifier is already present is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::NotAcceptingTasks`] unless the project is
    /// active.
    pub fn add_task(&mut self, mut task: Task) -> Result<(), ProjectDomainError> {
        if !self.can_accept_tasks() {
            return Err(ProjectDomainError::NotAcceptingTasks {
                project_id: self.id,
                status: self.status,
            });
        }
        if self.task(task.id()).is_some() {
            return Ok(());
        }
        task.attach_to(self.id);
        self.tasks.push(task);
        Ok(())
    }

    /// Removes a task regardless of project status.
    ///
    /// The returned task has no owning project. It is an orphan until it is
    /// added to another project or discarded. Returns `None` when the task is
    /// not owned by this project.
    pub fn remove_task(&mut self, id: TaskId) -> Option<Task> {
        let position = self.tasks.iter().position(|task| task.id() == id)?;
        let mut removed = self.tasks.remove(position);
        removed.detach();
        Some(removed)
    }

    /// Returns the number of owned tasks.
    #[must_use]
    pub fn total_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Returns the number of completed tasks. Cancelled tasks are not counted.
    #[must_use]
    pub fn completed_tasks(&self) -> usize {
        self.count_tasks(|status| status == TaskStatus::Completed)
    }

    /// Returns the number of tasks still to do or in progress.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.count_tasks(TaskStatus::is_pending)
    }

    /// Returns completed tasks as a percentage of all tasks, or `0.0` for a
    /// project without tasks.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "progress is reported as a floating-point percentage"
    )]
    pub fn progress(&self) -> f64 {
        if self.tasks.is_empty() {
            return 0.0;
        }
        let completed = f64::from(u32::try_from(self.completed_tasks()).unwrap_or(u32::MAX));
        let total = f64::from(u32::try_from(self.total_tasks()).unwrap_or(u32::MAX));
        completed / total * 100.0
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

    /// Mutable access to the owned tasks for storage stamping.
    pub(crate) fn tasks_for_storage(&mut self) -> &mut [Task] {
        &mut self.tasks
    }

    fn count_tasks(&self, predicate: impl Fn(TaskStatus) -> bool) -> usize {
        self.tasks
            .iter()
            .filter(|task| predicate(task.status()))
            .count()
    }
}

impl PartialEq for Project {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Project {}

impl Hash for Project {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
