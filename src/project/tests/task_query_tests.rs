//! Task queries answered by the in-memory project repository.

use std::sync::Arc;

use chrono::{Duration, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

use crate::project::{
    adapters::memory::InMemoryProjectRepository, domain::Project, ports::ProjectRepository,
};
use crate::task::{
    domain::{Task, TaskPriority, TaskStatus},
    ports::TaskQueryRepository,
};
use crate::user::domain::User;

type Repository = InMemoryProjectRepository<DefaultClock>;

struct Seeded {
    repository: Repository,
    website: Project,
    assignee: User,
}

/// Two projects. The website holds three tasks, one due tomorrow and one due
/// in ten days, the second project holds one urgent task.
#[fixture]
async fn seed() -> Seeded {
    let repository = InMemoryProjectRepository::new(Arc::new(DefaultClock));
    let owner =
        User::new("alice123", "alice@example.com", "secret1", None, None).expect("valid user");
    let assignee =
        User::new("bob123", "bob@example.com", "secret1", None, None).expect("valid user");
    let now = Utc::now();

    let mut website = Project::new("Website", None, &owner).expect("valid project");
    let mut soon = Task::new(
        &website,
        "Write landing copy",
        Some("Marketing text".to_owned()),
        Some(&assignee),
    )
    .expect("valid task");
    soon.update_due_date(Some(now + Duration::days(1)), &DefaultClock)
        .expect("future due date");
    let mut later = Task::new(&website, "Deploy site", None, None).expect("valid task");
    later
        .update_due_date(Some(now + Duration::days(10)), &DefaultClock)
        .expect("future due date");
    later.start().expect("todo task starts");
    let undated =
        Task::new(&website, "Collect feedback", None, Some(&assignee)).expect("valid task");
    for task in [soon, later, undated] {
        website.add_task(task).expect("active project");
    }

    let mut backend = Project::new("Backend", None, &owner).expect("valid project");
    let mut urgent = Task::new(&backend, "Fix login outage", None, None).expect("valid task");
    urgent.change_priority(TaskPriority::Urgent);
    backend.add_task(urgent).expect("active project");

    let stored_website = repository.store(&website).await.expect("store succeeds");
    repository.store(&backend).await.expect("store succeeds");

    Seeded {
        repository,
        website: stored_website,
        assignee,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_queries_return_owned_tasks(#[future] seed: Seeded) {
    let seeded = seed.await;
    let repository = &seeded.repository;
    let project_id = seeded.website.id();

    let all = repository.find_by_project(project_id).await.expect("query");
    assert_eq!(all.len(), 3);
    let titles: Vec<&str> = all.iter().map(|task| task.title().as_str()).collect();
    assert_eq!(
        titles,
        ["Write landing copy", "Deploy site", "Collect feedback"]
    );

    let in_progress = repository
        .find_by_project_and_status(project_id, TaskStatus::InProgress)
        .await
        .expect("query");
    assert_eq!(in_progress.len(), 1);
    assert_eq!(repository.count_by_project(project_id).await.expect("count"), 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignee_status_and_priority_queries(#[future] seed: Seeded) {
    let seeded = seed.await;
    let repository = &seeded.repository;
    let assignee_id = seeded.assignee.id();

    assert_eq!(
        repository.find_by_assignee(assignee_id).await.expect("query").len(),
        2
    );
    assert_eq!(
        repository
            .find_by_assignee_and_status(assignee_id, TaskStatus::InProgress)
            .await
            .expect("query")
            .len(),
        0
    );
    assert_eq!(repository.count_by_assignee(assignee_id).await.expect("count"), 2);
    assert_eq!(
        TaskQueryRepository::find_by_status(repository, TaskStatus::Todo)
            .await
            .expect("query")
            .len(),
        3
    );
    assert_eq!(
        TaskQueryRepository::count_by_status(repository, TaskStatus::InProgress)
            .await
            .expect("count"),
        1
    );
    let urgent = repository
        .find_by_priority(TaskPriority::Urgent)
        .await
        .expect("query");
    assert_eq!(urgent.len(), 1);
    assert_eq!(
        repository
            .find_by_priority(TaskPriority::Medium)
            .await
            .expect("query")
            .len(),
        3
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn due_date_queries_use_strict_and_inclusive_bounds(#[future] seed: Seeded) {
    let seeded = seed.await;
    let repository = &seeded.repository;
    let due: Vec<_> = seeded
        .website
        .tasks()
        .iter()
        .filter_map(Task::due_date)
        .collect();
    let [soon, later] = due.as_slice() else {
        panic!("expected two due dates, found {}", due.len());
    };

    let before_later = repository.find_due_before(*later).await.expect("query");
    assert_eq!(before_later.len(), 1);
    let after_soon = repository.find_due_after(*soon).await.expect("query");
    assert_eq!(after_soon.len(), 1);
    let between = repository
        .find_due_between(*soon, *later)
        .await
        .expect("query");
    assert_eq!(between.len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn text_searches_ignore_case(#[future] seed: Seeded) {
    let seeded = seed.await;
    let repository = &seeded.repository;

    assert_eq!(repository.search_by_title("SITE").await.expect("search").len(), 1);
    assert_eq!(
        TaskQueryRepository::search_by_description(repository, "marketing")
            .await
            .expect("search")
            .len(),
        1
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lookup_by_id_follows_project_updates(#[future] seed: Seeded) {
    let seeded = seed.await;
    let repository = &seeded.repository;
    let mut website = seeded.website;
    let task_id = website.tasks().first().map(Task::id).expect("seeded task");

    website.remove_task(task_id).expect("task is owned");
    repository.update(&website).await.expect("update succeeds");

    assert!(
        TaskQueryRepository::find_by_id(repository, task_id)
            .await
            .expect("lookup")
            .is_none()
    );
}
