//! Shared world state for project completion BDD scenarios.

use std::sync::Arc;

use eyre::OptionExt;
use mockable::DefaultClock;
use rstest::fixture;
use taskflow::{
    project::{
        adapters::memory::InMemoryProjectRepository,
        domain::Project,
        services::{ProjectLifecycleError, ProjectLifecycleService},
    },
    task::{
        domain::Task,
        services::{TaskWorkflowError, TaskWorkflowService},
    },
    user::{
        adapters::memory::InMemoryUserRepository,
        domain::User,
        services::{UserAccountError, UserAccountService},
    },
};

type Users = InMemoryUserRepository<DefaultClock>;
type Projects = InMemoryProjectRepository<DefaultClock>;

/// Scenario world wiring the three services over shared in-memory stores.
pub struct ProjectCompletionWorld {
    pub accounts: UserAccountService<Users, Projects>,
    pub projects: ProjectLifecycleService<Projects, Users>,
    pub tasks: TaskWorkflowService<Projects, Projects, Users, DefaultClock>,
    pub owner: Option<User>,
    pub project: Option<Project>,
    pub created_tasks: Vec<Task>,
    pub last_project_result: Option<Result<Project, ProjectLifecycleError>>,
    pub last_task_result: Option<Result<Task, TaskWorkflowError>>,
    pub last_user_result: Option<Result<User, UserAccountError>>,
}

impl ProjectCompletionWorld {
    /// Creates a world with empty stores.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let users = Arc::new(InMemoryUserRepository::new(Arc::clone(&clock)));
        let projects = Arc::new(InMemoryProjectRepository::new(Arc::clone(&clock)));

        Self {
            accounts: UserAccountService::new(Arc::clone(&users), Arc::clone(&projects)),
            projects: ProjectLifecycleService::new(Arc::clone(&projects), Arc::clone(&users)),
            tasks: TaskWorkflowService::new(Arc::clone(&projects), projects, users, clock),
            owner: None,
            project: None,
            created_tasks: Vec::new(),
            last_project_result: None,
            last_task_result: None,
            last_user_result: None,
        }
    }

    /// Returns the registered owner.
    pub fn owner(&self) -> eyre::Result<&User> {
        self.owner
            .as_ref()
            .ok_or_eyre("missing registered user in scenario world")
    }

    /// Returns the project created by the scenario.
    pub fn project(&self) -> eyre::Result<&Project> {
        self.project
            .as_ref()
            .ok_or_eyre("missing project in scenario world")
    }

    /// Finds a task created by the scenario by its title.
    pub fn task_titled(&self, title: &str) -> eyre::Result<&Task> {
        self.created_tasks
            .iter()
            .find(|task| task.title().as_str() == title)
            .ok_or_else(|| eyre::eyre!("no task titled {title:?} in scenario world"))
    }
}

impl Default for ProjectCompletionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ProjectCompletionWorld {
    ProjectCompletionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
