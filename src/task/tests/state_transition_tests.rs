//! Status state machine coverage.

use rstest::{fixture, rstest};

use crate::project::domain::Project;
use crate::task::domain::{Task, TaskDomainError, TaskStatus};
use crate::task::services::TaskTransition;
use crate::user::domain::User;

#[fixture]
fn project() -> Project {
    let owner =
        User::new("alice123", "alice@example.com", "secret1", None, None).expect("valid user");
    Project::new("Website", None, &owner).expect("valid project")
}

/// Builds a task and walks it into `status` through legal transitions.
fn task_in(project: &Project, status: TaskStatus) -> Task {
    let mut task = Task::new(project, "Write spec", None, None).expect("valid task");
    match status {
        TaskStatus::Todo => {}
        TaskStatus::InProgress => task.start().expect("start"),
        TaskStatus::Completed => {
            task.start().expect("start");
            task.complete().expect("complete");
        }
        TaskStatus::Cancelled => task.cancel().expect("cancel"),
    }
    task
}

fn apply(task: &mut Task, transition: TaskTransition) -> Result<(), TaskDomainError> {
    match transition {
        TaskTransition::Start => task.start(),
        TaskTransition::Complete => task.complete(),
        TaskTransition::Cancel => task.cancel(),
        TaskTransition::Reopen => task.reopen(),
    }
}

#[rstest]
#[case(TaskStatus::Todo, TaskTransition::Start, TaskStatus::InProgress)]
#[case(TaskStatus::InProgress, TaskTransition::Complete, TaskStatus::Completed)]
#[case(TaskStatus::Todo, TaskTransition::Cancel, TaskStatus::Cancelled)]
#[case(TaskStatus::InProgress, TaskTransition::Cancel, TaskStatus::Cancelled)]
#[case(TaskStatus::Cancelled, TaskTransition::Cancel, TaskStatus::Cancelled)]
#[case(TaskStatus::Cancelled, TaskTransition::Reopen, TaskStatus::Todo)]
fn permitted_transitions(
    project: Project,
    #[case] from: TaskStatus,
    #[case] transition: TaskTransition,
    #[case] to: TaskStatus,
) {
    let mut task = task_in(&project, from);
    apply(&mut task, transition).expect("transition is permitted");
    assert_eq!(task.status(), to);
}

#[rstest]
#[case(TaskStatus::InProgress, TaskTransition::Start, TaskStatus::InProgress)]
#[case(TaskStatus::Completed, TaskTransition::Start, TaskStatus::InProgress)]
#[case(TaskStatus::Cancelled, TaskTransition::Start, TaskStatus::InProgress)]
#[case(TaskStatus::Todo, TaskTransition::Complete, TaskStatus::Completed)]
#[case(TaskStatus::Cancelled, TaskTransition::Complete, TaskStatus::Completed)]
#[case(TaskStatus::Completed, TaskTransition::Complete, TaskStatus::Completed)]
#[case(TaskStatus::Completed, TaskTransition::Cancel, TaskStatus::Cancelled)]
#[case(TaskStatus::Todo, TaskTransition::Reopen, TaskStatus::Todo)]
#[case(TaskStatus::InProgress, TaskTransition::Reopen, TaskStatus::Todo)]
#[case(TaskStatus::Completed, TaskTransition::Reopen, TaskStatus::Todo)]
fn refused_transitions_leave_status_unchanged(
    project: Project,
    #[case] from: TaskStatus,
    #[case] transition: TaskTransition,
    #[case] requested: TaskStatus,
) {
    let mut task = task_in(&project, from);
    let err = apply(&mut task, transition).expect_err("transition is refused");

    assert_eq!(
        err,
        TaskDomainError::InvalidTransition {
            task_id: task.id(),
            from,
            to: requested,
        }
    );
    assert_eq!(task.status(), from);
}

#[rstest]
fn closed_statuses_freeze_editing_and_assignment(project: Project) {
    for status in [TaskStatus::Completed, TaskStatus::Cancelled] {
        let task = task_in(&project, status);
        assert!(status.is_closed());
        assert!(!status.is_pending());
        assert!(!task.can_be_edited());
        assert!(!task.can_be_assigned());
    }
    for status in [TaskStatus::Todo, TaskStatus::InProgress] {
        assert!(status.is_pending());
        assert!(task_in(&project, status).can_be_edited());
    }
}

#[rstest]
fn reopened_task_can_be_started_again(project: Project) {
    let mut task = task_in(&project, TaskStatus::Cancelled);
    task.reopen().expect("cancelled task reopens");
    task.start().expect("todo task starts");
    task.complete().expect("started task completes");
    assert_eq!(task.status(), TaskStatus::Completed);
}
