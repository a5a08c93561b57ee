//! When steps for project completion BDD scenarios.

use super::world::{ProjectCompletionWorld, run_async};
use rstest_bdd_macros::when;
use taskflow::task::services::TaskTransition;

fn apply_transition(
    world: &mut ProjectCompletionWorld,
    title: &str,
    transition: TaskTransition,
) -> Result<(), eyre::Report> {
    let task_id = world.task_titled(title)?.id();
    let result = run_async(world.tasks.transition(task_id, transition));
    world.last_task_result = Some(result);
    Ok(())
}

#[when(r#"the task "{title}" is started"#)]
fn task_started(world: &mut ProjectCompletionWorld, title: String) -> Result<(), eyre::Report> {
    apply_transition(world, &title, TaskTransition::Start)
}

#[when(r#"the task "{title}" is completed"#)]
fn task_completed(world: &mut ProjectCompletionWorld, title: String) -> Result<(), eyre::Report> {
    apply_transition(world, &title, TaskTransition::Complete)
}

#[when(r#"the task "{title}" is cancelled"#)]
fn task_cancelled(world: &mut ProjectCompletionWorld, title: String) -> Result<(), eyre::Report> {
    apply_transition(world, &title, TaskTransition::Cancel)
}

#[when("the project is completed")]
fn project_completed(world: &mut ProjectCompletionWorld) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let result = run_async(world.projects.complete(project_id));
    world.last_project_result = Some(result);
    Ok(())
}

#[when("the project is archived")]
fn project_archived(world: &mut ProjectCompletionWorld) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let result = run_async(world.projects.archive(project_id));
    world.last_project_result = Some(result);
    Ok(())
}

#[when("the user is deactivated")]
fn user_deactivated(world: &mut ProjectCompletionWorld) -> Result<(), eyre::Report> {
    let user_id = world.owner()?.id();
    let result = run_async(world.accounts.deactivate(user_id));
    world.last_user_result = Some(result);
    Ok(())
}
