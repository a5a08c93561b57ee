//! In-memory repository for project aggregates.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard};

use crate::project::{
    domain::{Project, ProjectId, ProjectStatus},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use crate::task::domain::{Task, TaskId};
use crate::user::domain::UserId;

/// Thread-safe in-memory project repository.
///
/// Projects are stored with their tasks. Clones share the same state, so a
/// single instance can serve both [`ProjectRepository`] and
/// [`crate::task::ports::TaskQueryRepository`].
pub struct InMemoryProjectRepository<C> {
    state: Arc<RwLock<InMemoryProjectState>>,
    clock: Arc<C>,
}

impl<C> Clone for InMemoryProjectRepository<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

#[derive(Debug, Default)]
pub(super) struct InMemoryProjectState {
    projects: HashMap<ProjectId, Project>,
    task_index: HashMap<TaskId, ProjectId>,
}

impl InMemoryProjectState {
    /// Projects in creation order.
    pub(super) fn projects_in_order(&self) -> Vec<&Project> {
        let mut ordered: Vec<&Project> = self.projects.values().collect();
        ordered.sort_by_key(|project| (project.created_at(), project.id().into_inner()));
        ordered
    }

    /// Every stored task, grouped by project in creation order.
    pub(super) fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.projects_in_order()
            .into_iter()
            .flat_map(|project| project.tasks().iter())
    }

    pub(super) fn task(&self, id: TaskId) -> Option<&Task> {
        self.task_index
            .get(&id)
            .and_then(|project_id| self.projects.get(project_id))
            .and_then(|project| project.task(id))
    }

    fn index_tasks(&mut self, project: &Project) {
        for task in project.tasks() {
            self.task_index.insert(task.id(), project.id());
        }
    }

    fn unindex_tasks(&mut self, project: &Project) {
        for task in project.tasks() {
            self.task_index.remove(&task.id());
        }
    }
}

impl<C: Clock + Send + Sync> InMemoryProjectRepository<C> {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryProjectState::default())),
            clock,
        }
    }

    pub(super) fn read_state(
        &self,
    ) -> Result<RwLockReadGuard<'_, InMemoryProjectState>, std::io::Error> {
        self.state
            .read()
            .map_err(|err| std::io::Error::other(err.to_string()))
    }
}

fn lock_error(err: impl std::fmt::Display) -> ProjectRepositoryError {
    ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Stamps tasks that are new to storage or changed since `previous`.
fn stamp_tasks(project: &mut Project, previous: Option<&Project>, now: DateTime<Utc>) {
    for task in project.tasks_for_storage() {
        match previous.and_then(|old| old.task(task.id())) {
            None if !task.is_persisted() => task.stamp_created(now),
            None => task.stamp_updated(now),
            Some(old) if task.differs_from(old) => task.stamp_updated(now),
            Some(_) => {}
        }
    }
}

fn collect(projects: Vec<&Project>, predicate: impl Fn(&Project) -> bool) -> Vec<Project> {
    projects
        .into_iter()
        .filter(|project| predicate(project))
        .cloned()
        .collect()
}

fn contains_ignore_case(haystack: Option<&str>, fragment: &str) -> bool {
    haystack.is_some_and(|text| text.to_lowercase().contains(&fragment.to_lowercase()))
}

#[async_trait]
impl<C: Clock + Send + Sync> ProjectRepository for InMemoryProjectRepository<C> {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<Project> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.projects.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::DuplicateProject(project.id()));
        }

        let now = self.clock.utc();
        let mut stored = project.clone();
        stored.stamp_created(now);
        stamp_tasks(&mut stored, None, now);
        state.index_tasks(&stored);
        state.projects.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<Project> {
        let mut state = self.state.write().map_err(lock_error)?;
        let previous = state
            .projects
            .get(&project.id())
            .ok_or(ProjectRepositoryError::NotFound(project.id()))?
            .clone();
        if previous.version() != project.version() {
            return Err(ProjectRepositoryError::VersionConflict {
                id: project.id(),
                expected: previous.version(),
                found: project.version(),
            });
        }

        let now = self.clock.utc();
        let mut stored = project.clone();
        if let Some(created_at) = previous.created_at() {
            stored.stamp_created(created_at);
        }
        stored.stamp_updated(now);
        stamp_tasks(&mut stored, Some(&previous), now);

        state.unindex_tasks(&previous);
        state.index_tasks(&stored);
        state.projects.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<bool> {
        let mut state = self.state.write().map_err(lock_error)?;
        let Some(removed) = state.projects.remove(&id) else {
            return Ok(false);
        };
        state.unindex_tasks(&removed);
        Ok(true)
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner_id: UserId) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(collect(state.projects_in_order(), |project| {
            project.owner_id() == owner_id
        }))
    }

    async fn find_by_owner_and_status(
        &self,
        owner_id: UserId,
        status: ProjectStatus,
    ) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(collect(state.projects_in_order(), |project| {
            project.owner_id() == owner_id && project.status() == status
        }))
    }

    async fn find_by_status(
        &self,
        status: ProjectStatus,
    ) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(collect(state.projects_in_order(), |project| {
            project.status() == status
        }))
    }

    async fn search_by_name(&self, fragment: &str) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(collect(state.projects_in_order(), |project| {
            contains_ignore_case(Some(project.name().as_str()), fragment)
        }))
    }

    async fn search_by_description(
        &self,
        fragment: &str,
    ) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(collect(state.projects_in_order(), |project| {
            contains_ignore_case(project.description(), fragment)
        }))
    }

    async fn count_by_owner(&self, owner_id: UserId) -> ProjectRepositoryResult<usize> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .projects
            .values()
            .filter(|project| project.owner_id() == owner_id)
            .count())
    }

    async fn count_by_status(&self, status: ProjectStatus) -> ProjectRepositoryResult<usize> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .projects
            .values()
            .filter(|project| project.status() == status)
            .count())
    }
}
