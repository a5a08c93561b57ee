//! Then steps for project completion BDD scenarios.

use super::world::{ProjectCompletionWorld, run_async};
use eyre::{OptionExt, WrapErr};
use rstest_bdd_macros::then;
use taskflow::{error::ServiceErrorKind, project::domain::Project};

fn reload_project(world: &ProjectCompletionWorld) -> Result<Project, eyre::Report> {
    let project_id = world.project()?.id();
    run_async(world.projects.find_by_id(project_id))
        .wrap_err("reload scenario project")?
        .ok_or_eyre("scenario project disappeared")
}

fn expect_kind(
    actual: Option<ServiceErrorKind>,
    expected: ServiceErrorKind,
) -> Result<(), eyre::Report> {
    match actual {
        Some(kind) if kind == expected => Ok(()),
        Some(kind) => Err(eyre::eyre!(
            "expected {} error, got {}",
            expected.as_str(),
            kind.as_str()
        )),
        None => Err(eyre::eyre!("expected {} error, got success", expected.as_str())),
    }
}

#[then(r#"the project status is "{status}""#)]
fn project_status_is(world: &ProjectCompletionWorld, status: String) -> Result<(), eyre::Report> {
    let project = reload_project(world)?;
    if project.status().as_str() != status {
        return Err(eyre::eyre!(
            "expected project status {status}, found {}",
            project.status()
        ));
    }
    Ok(())
}

#[then(r#"the project progress is "{progress}""#)]
fn project_progress_is(
    world: &ProjectCompletionWorld,
    progress: String,
) -> Result<(), eyre::Report> {
    let project = reload_project(world)?;
    let actual = format!("{:.1}", project.progress());
    if actual != progress {
        return Err(eyre::eyre!("expected progress {progress}, found {actual}"));
    }
    Ok(())
}

#[then("the project change fails with an invariant violation")]
fn project_change_fails(world: &ProjectCompletionWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_project_result
        .as_ref()
        .ok_or_eyre("missing project result")?;
    expect_kind(
        result.as_ref().err().map(|err| err.kind()),
        ServiceErrorKind::InvariantViolation,
    )
}

#[then("the task change fails with an invalid state error")]
fn task_change_fails(world: &ProjectCompletionWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_task_result
        .as_ref()
        .ok_or_eyre("missing task result")?;
    expect_kind(
        result.as_ref().err().map(|err| err.kind()),
        ServiceErrorKind::InvalidState,
    )
}

#[then(r#"the task "{title}" has status "{status}""#)]
fn task_has_status(
    world: &ProjectCompletionWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task_titled(&title)?.id();
    let task = run_async(world.tasks.find_by_id(task_id))
        .wrap_err("reload scenario task")?
        .ok_or_eyre("scenario task disappeared")?;
    if task.status().as_str() != status {
        return Err(eyre::eyre!(
            "expected task status {status}, found {}",
            task.status()
        ));
    }
    Ok(())
}

#[then("the deactivation fails with an invariant violation")]
fn deactivation_fails(world: &ProjectCompletionWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_user_result
        .as_ref()
        .ok_or_eyre("missing deactivation result")?;
    expect_kind(
        result.as_ref().err().map(|err| err.kind()),
        ServiceErrorKind::InvariantViolation,
    )
}

#[then(r#"the user status is "{status}""#)]
fn user_status_is(world: &ProjectCompletionWorld, status: String) -> Result<(), eyre::Report> {
    let user_id = world.owner()?.id();
    let user = run_async(world.accounts.find_by_id(user_id))
        .wrap_err("reload scenario user")?
        .ok_or_eyre("scenario user disappeared")?;
    if user.status().as_str() != status {
        return Err(eyre::eyre!(
            "expected user status {status}, found {}",
            user.status().as_str()
        ));
    }
    Ok(())
}
