//! Workflow service tests over the in-memory stores.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::FixedClock;
use crate::error::ServiceErrorKind;
use crate::project::{
    adapters::memory::InMemoryProjectRepository,
    domain::{Project, ProjectId, ProjectStatus},
    ports::{ProjectRepository, ProjectRepositoryError, repository::MockProjectRepository},
};
use crate::task::{
    domain::{Task, TaskDomainError, TaskId, TaskPriority, TaskStatus},
    ports::{TaskRepositoryError, repository::MockTaskQueryRepository},
    services::{CreateTaskRequest, TaskTransition, TaskWorkflowError, TaskWorkflowService},
};
use crate::user::{
    adapters::memory::InMemoryUserRepository,
    domain::{User, UserId},
    ports::{UserRepository, repository::MockUserRepository},
};

type Users = InMemoryUserRepository<FixedClock>;
type Projects = InMemoryProjectRepository<FixedClock>;
type Service = TaskWorkflowService<Projects, Projects, Users, FixedClock>;

struct Harness {
    service: Service,
    users: Arc<Users>,
    projects: Arc<Projects>,
    clock: FixedClock,
    owner: User,
    project: Project,
}

impl Harness {
    /// Builds a second service over the same stores with a later clock.
    fn later_by(&self, days: i64) -> Service {
        TaskWorkflowService::new(
            Arc::clone(&self.projects),
            Arc::clone(&self.projects),
            Arc::clone(&self.users),
            Arc::new(FixedClock(self.clock.0 + Duration::days(days))),
        )
    }

    async fn create(&self, title: &str) -> Task {
        self.service
            .create_task(CreateTaskRequest::new(self.project.id(), title))
            .await
            .expect("task creation succeeds")
    }
}

#[fixture]
async fn context() -> Harness {
    let clock = FixedClock(
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid instant"),
    );
    let users = Arc::new(InMemoryUserRepository::new(Arc::new(clock)));
    let projects = Arc::new(InMemoryProjectRepository::new(Arc::new(clock)));

    let owner = User::new("alice123", "alice@example.com", "secret1", None, None)
        .expect("valid user");
    let stored_owner = users.store(&owner).await.expect("user stored");
    let project = Project::new("Website", None, &stored_owner).expect("valid project");
    let stored_project = projects.store(&project).await.expect("project stored");

    Harness {
        service: TaskWorkflowService::new(
            Arc::clone(&projects),
            Arc::clone(&projects),
            Arc::clone(&users),
            Arc::new(clock),
        ),
        users,
        projects,
        clock,
        owner: stored_owner,
        project: stored_project,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_task_adds_it_to_the_project(#[future] context: Harness) {
    let harness = context.await;
    let due = harness.clock.0 + Duration::days(7);

    let task = harness
        .service
        .create_task(
            CreateTaskRequest::new(harness.project.id(), "Write spec")
                .with_description("First draft")
                .with_priority(TaskPriority::High)
                .with_due_date(due)
                .with_assignee(harness.owner.id()),
        )
        .await
        .expect("task creation succeeds");

    assert!(task.is_persisted());
    assert_eq!(task.created_at(), Some(harness.clock.0));
    assert_eq!(task.priority(), TaskPriority::High);
    assert_eq!(task.due_date(), Some(due));
    assert_eq!(task.assigned_to(), Some(harness.owner.id()));

    let project = harness
        .projects
        .find_by_id(harness.project.id())
        .await
        .expect("lookup succeeds")
        .expect("project exists");
    assert_eq!(project.total_tasks(), 1);
    assert_eq!(
        harness
            .service
            .find_by_id(task.id())
            .await
            .expect("lookup succeeds")
            .map(|found| found.id()),
        Some(task.id())
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_task_reports_unknown_references(#[future] context: Harness) {
    let harness = context.await;
    let ghost_project = ProjectId::new();
    let missing_project = harness
        .service
        .create_task(CreateTaskRequest::new(ghost_project, "Write spec"))
        .await
        .expect_err("project does not exist");
    assert!(
        matches!(missing_project, TaskWorkflowError::ProjectNotFound(id) if id == ghost_project)
    );

    let ghost_user = UserId::new();
    let missing_user = harness
        .service
        .create_task(
            CreateTaskRequest::new(harness.project.id(), "Write spec").with_assignee(ghost_user),
        )
        .await
        .expect_err("assignee does not exist");
    assert!(matches!(missing_user, TaskWorkflowError::UserNotFound(id) if id == ghost_user));
    assert_eq!(missing_user.kind(), ServiceErrorKind::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_task_validates_before_persisting(#[future] context: Harness) {
    let harness = context.await;
    let past = harness
        .service
        .create_task(
            CreateTaskRequest::new(harness.project.id(), "Write spec")
                .with_due_date(harness.clock.0 - Duration::hours(1)),
        )
        .await
        .expect_err("due date is in the past");
    assert!(matches!(
        past,
        TaskWorkflowError::Domain(TaskDomainError::DueDateInPast)
    ));
    assert_eq!(past.kind(), ServiceErrorKind::InvalidArgument);

    let short = harness
        .service
        .create_task(CreateTaskRequest::new(harness.project.id(), "ab"))
        .await
        .expect_err("title is too short");
    assert_eq!(short.kind(), ServiceErrorKind::InvalidArgument);

    let listed = harness
        .service
        .list_for_project(harness.project.id(), None)
        .await
        .expect("listing succeeds");
    assert!(listed.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_task_is_refused_for_closed_projects(#[future] context: Harness) {
    let harness = context.await;
    let mut project = harness.project.clone();
    project.complete().expect("empty project completes");
    harness
        .projects
        .update(&project)
        .await
        .expect("project updated");

    let err = harness
        .service
        .create_task(CreateTaskRequest::new(project.id(), "Write spec"))
        .await
        .expect_err("completed project");
    assert!(matches!(
        err,
        TaskWorkflowError::Domain(TaskDomainError::ProjectNotAcceptingTasks { .. })
    ));
    assert_eq!(err.kind(), ServiceErrorKind::InvariantViolation);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transitions_are_persisted_and_validated(#[future] context: Harness) {
    let harness = context.await;
    let task = harness.create("Write spec").await;

    let started = harness
        .service
        .transition(task.id(), TaskTransition::Start)
        .await
        .expect("todo task starts");
    assert_eq!(started.status(), TaskStatus::InProgress);

    let err = harness
        .service
        .transition(task.id(), TaskTransition::Reopen)
        .await
        .expect_err("in-progress task cannot reopen");
    assert_eq!(err.kind(), ServiceErrorKind::InvalidState);

    harness
        .service
        .transition(task.id(), TaskTransition::Complete)
        .await
        .expect("started task completes");
    let in_progress = harness
        .service
        .list_for_project(harness.project.id(), Some(TaskStatus::InProgress))
        .await
        .expect("listing succeeds");
    let completed = harness
        .service
        .list_for_project(harness.project.id(), Some(TaskStatus::Completed))
        .await
        .expect("listing succeeds");
    assert!(in_progress.is_empty());
    assert_eq!(completed.len(), 1);

    let edit = harness
        .service
        .update_task(task.id(), "Rewrite spec", None)
        .await
        .expect_err("completed task is frozen");
    assert!(matches!(
        edit,
        TaskWorkflowError::Domain(TaskDomainError::NotEditable { .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn editing_priority_due_date_and_assignment(#[future] context: Harness) {
    let harness = context.await;
    let task = harness.create("Write spec").await;

    let edited = harness
        .service
        .update_task(task.id(), "Write the spec", Some("Outline first".to_owned()))
        .await
        .expect("open task is editable");
    assert_eq!(edited.title().as_str(), "Write the spec");

    let urgent = harness
        .service
        .change_priority(task.id(), TaskPriority::Urgent)
        .await
        .expect("priority changes");
    assert_eq!(urgent.priority(), TaskPriority::Urgent);

    let past = harness
        .service
        .update_due_date(task.id(), Some(harness.clock.0 - Duration::days(1)))
        .await
        .expect_err("past due date");
    assert_eq!(past.kind(), ServiceErrorKind::InvalidArgument);
    let cleared = harness
        .service
        .update_due_date(task.id(), None)
        .await
        .expect("clearing succeeds");
    assert_eq!(cleared.due_date(), None);

    let assigned = harness
        .service
        .assign(task.id(), harness.owner.id())
        .await
        .expect("assignment succeeds");
    assert_eq!(assigned.assigned_to(), Some(harness.owner.id()));
    let mine = harness
        .service
        .list_for_assignee(harness.owner.id(), None)
        .await
        .expect("listing succeeds");
    assert_eq!(mine.len(), 1);

    let unassigned = harness
        .service
        .unassign(task.id())
        .await
        .expect("unassignment succeeds");
    assert_eq!(unassigned.assigned_to(), None);
    assert!(
        harness
            .service
            .list_for_assignee(harness.owner.id(), Some(TaskStatus::Todo))
            .await
            .expect("listing succeeds")
            .is_empty()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remove_task_returns_the_orphan(#[future] context: Harness) {
    let harness = context.await;
    let task = harness.create("Write spec").await;

    let removed = harness
        .service
        .remove_task(task.id())
        .await
        .expect("removal succeeds");
    assert_eq!(removed.id(), task.id());
    assert_eq!(removed.project_id(), None);

    let err = harness
        .service
        .remove_task(task.id())
        .await
        .expect_err("already removed");
    assert!(matches!(err, TaskWorkflowError::NotFound(id) if id == task.id()));
    assert!(
        harness
            .service
            .find_by_id(task.id())
            .await
            .expect("lookup succeeds")
            .is_none()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mutations_on_unknown_tasks_report_not_found(#[future] context: Harness) {
    let harness = context.await;
    let missing = TaskId::new();
    let err = harness
        .service
        .transition(missing, TaskTransition::Cancel)
        .await
        .expect_err("task does not exist");
    assert!(matches!(err, TaskWorkflowError::NotFound(id) if id == missing));
    assert_eq!(err.kind(), ServiceErrorKind::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overdue_listing_skips_closed_and_future_tasks(#[future] context: Harness) {
    let harness = context.await;
    let due_tomorrow = harness.clock.0 + Duration::days(1);
    for title in ["Open and late", "Closed and late"] {
        harness
            .service
            .create_task(
                CreateTaskRequest::new(harness.project.id(), title).with_due_date(due_tomorrow),
            )
            .await
            .expect("task creation succeeds");
    }
    harness
        .service
        .create_task(
            CreateTaskRequest::new(harness.project.id(), "Far away")
                .with_due_date(harness.clock.0 + Duration::days(30)),
        )
        .await
        .expect("task creation succeeds");

    assert!(
        harness
            .service
            .list_overdue()
            .await
            .expect("listing succeeds")
            .is_empty()
    );

    let closed = harness
        .service
        .list_for_project(harness.project.id(), None)
        .await
        .expect("listing succeeds")
        .into_iter()
        .find(|task| task.title().as_str() == "Closed and late")
        .expect("task exists");
    harness
        .service
        .transition(closed.id(), TaskTransition::Cancel)
        .await
        .expect("open task cancels");

    let overdue = harness
        .later_by(3)
        .list_overdue()
        .await
        .expect("listing succeeds");
    let titles: Vec<&str> = overdue.iter().map(|task| task.title().as_str()).collect();
    assert_eq!(titles, ["Open and late"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creations_never_drop_acknowledged_tasks(#[future] context: Harness) {
    let harness = context.await;
    let project_id = harness.project.id();
    let handles: Vec<_> = (0..64)
        .map(|index| {
            let service = harness.service.clone();
            tokio::spawn(async move {
                service
                    .create_task(CreateTaskRequest::new(project_id, format!("Task {index}")))
                    .await
            })
        })
        .collect();

    let mut acknowledged = Vec::new();
    for handle in handles {
        match handle.await.expect("creation task joins") {
            Ok(task) => acknowledged.push(task.id()),
            Err(err) => {
                assert!(matches!(
                    err,
                    TaskWorkflowError::Repository(ProjectRepositoryError::VersionConflict { .. })
                ));
                assert_eq!(err.kind(), ServiceErrorKind::Conflict);
            }
        }
    }

    let stored = harness
        .projects
        .find_by_id(project_id)
        .await
        .expect("lookup succeeds")
        .expect("project exists");
    assert!(!acknowledged.is_empty());
    assert_eq!(stored.tasks().len(), acknowledged.len());
    assert!(acknowledged.iter().all(|id| stored.task(*id).is_some()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stale_completion_cannot_discard_a_new_task(#[future] context: Harness) {
    let harness = context.await;
    let mut stale = harness.project.clone();
    harness.create("Write spec").await;

    stale.complete().expect("stale snapshot has no open tasks");
    let err = harness
        .projects
        .update(&stale)
        .await
        .expect_err("snapshot predates the new task");
    assert_eq!(err.kind(), ServiceErrorKind::Conflict);

    let current = harness
        .projects
        .find_by_id(harness.project.id())
        .await
        .expect("lookup succeeds")
        .expect("project exists");
    assert_eq!(current.status(), ProjectStatus::Active);
    assert_eq!(current.tasks().len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn persistence_failures_are_reported_as_internal() {
    let owner =
        User::new("alice123", "alice@example.com", "secret1", None, None).expect("valid user");
    let mut project = Project::new("Website", None, &owner).expect("valid project");
    let task = Task::new(&project, "Write spec", None, None).expect("valid task");
    project.add_task(task.clone()).expect("active project");
    let task_id = task.id();

    let mut tasks = MockTaskQueryRepository::new();
    tasks
        .expect_find_by_id()
        .returning(move |_| Ok(Some(task.clone())));
    let mut projects = MockProjectRepository::new();
    projects
        .expect_find_by_id()
        .returning(move |_| Ok(Some(project.clone())));
    projects.expect_update().returning(|_| {
        Err(ProjectRepositoryError::persistence(std::io::Error::other(
            "write failed",
        )))
    });
    let service = TaskWorkflowService::new(
        Arc::new(projects),
        Arc::new(tasks),
        Arc::new(MockUserRepository::new()),
        Arc::new(FixedClock(Utc::now())),
    );

    let err = service
        .transition(task_id, TaskTransition::Start)
        .await
        .expect_err("storage fails");
    assert!(matches!(
        err,
        TaskWorkflowError::Repository(ProjectRepositoryError::Persistence(_))
    ));
    assert_eq!(err.kind(), ServiceErrorKind::Internal);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn query_failures_are_reported_as_internal() {
    let mut tasks = MockTaskQueryRepository::new();
    tasks.expect_find_by_project().returning(|_| {
        Err(TaskRepositoryError::persistence(std::io::Error::other(
            "read failed",
        )))
    });
    let service = TaskWorkflowService::new(
        Arc::new(MockProjectRepository::new()),
        Arc::new(tasks),
        Arc::new(MockUserRepository::new()),
        Arc::new(FixedClock(Utc::now())),
    );

    let err = service
        .list_for_project(ProjectId::new(), None)
        .await
        .expect_err("query fails");
    assert!(matches!(err, TaskWorkflowError::Query(_)));
    assert_eq!(err.kind(), ServiceErrorKind::Internal);
}
