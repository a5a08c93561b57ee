//! Task queries answered from the in-memory project store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;

use super::InMemoryProjectRepository;
use crate::project::domain::ProjectId;
use crate::task::{
    domain::{Task, TaskId, TaskPriority, TaskStatus},
    ports::{TaskQueryRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;

impl<C: Clock + Send + Sync> InMemoryProjectRepository<C> {
    fn select(&self, predicate: impl Fn(&Task) -> bool) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read_state().map_err(TaskRepositoryError::persistence)?;
        Ok(state
            .tasks()
            .filter(|task| predicate(task))
            .cloned()
            .collect())
    }

    fn count(&self, predicate: impl Fn(&Task) -> bool) -> TaskRepositoryResult<usize> {
        let state = self.read_state().map_err(TaskRepositoryError::persistence)?;
        Ok(state.tasks().filter(|task| predicate(task)).count())
    }
}

fn text_contains(text: Option<&str>, fragment: &str) -> bool {
    text.is_some_and(|value| value.to_lowercase().contains(&fragment.to_lowercase()))
}

#[async_trait]
impl<C: Clock + Send + Sync> TaskQueryRepository for InMemoryProjectRepository<C> {
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read_state().map_err(TaskRepositoryError::persistence)?;
        Ok(state.task(id).cloned())
    }

    async fn find_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        self.select(|task| task.project_id() == Some(project_id))
    }

    async fn find_by_project_and_status(
        &self,
        project_id: ProjectId,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Vec<Task>> {
        self.select(|task| task.project_id() == Some(project_id) && task.status() == status)
    }

    async fn find_by_assignee(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.select(|task| task.assigned_to() == Some(user_id))
    }

    async fn find_by_assignee_and_status(
        &self,
        user_id: UserId,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Vec<Task>> {
        self.select(|task| task.assigned_to() == Some(user_id) && task.status() == status)
    }

    async fn find_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        self.select(|task| task.status() == status)
    }

    async fn find_by_priority(&self, priority: TaskPriority) -> TaskRepositoryResult<Vec<Task>> {
        self.select(|task| task.priority() == priority)
    }

    async fn find_due_before(&self, instant: DateTime<Utc>) -> TaskRepositoryResult<Vec<Task>> {
        self.select(|task| task.due_date().is_some_and(|due| due < instant))
    }

    async fn find_due_after(&self, instant: DateTime<Utc>) -> TaskRepositoryResult<Vec<Task>> {
        self.select(|task| task.due_date().is_some_and(|due| due > instant))
    }

    async fn find_due_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        self.select(|task| {
            task.due_date()
                .is_some_and(|due| (start..=end).contains(&due))
        })
    }

    async fn search_by_title(&self, fragment: &str) -> TaskRepositoryResult<Vec<Task>> {
        self.select(|task| task.title().contains(fragment))
    }

    async fn search_by_description(&self, fragment: &str) -> TaskRepositoryResult<Vec<Task>> {
        self.select(|task| text_contains(task.description(), fragment))
    }

    async fn count_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize> {
        self.count(|task| task.project_id() == Some(project_id))
    }

    async fn count_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<usize> {
        self.count(|task| task.status() == status)
    }

    async fn count_by_assignee(&self, user_id: UserId) -> TaskRepositoryResult<usize> {
        self.count(|task| task.assigned_to() == Some(user_id))
    }
}
