//! Given steps for project completion BDD scenarios.

use super::world::{ProjectCompletionWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskflow::{
    project::services::CreateProjectRequest, task::services::CreateTaskRequest,
    user::services::RegisterUserRequest,
};

#[given(r#"a registered user "{username}" with email "{email}" and password "{password}""#)]
fn registered_user(
    world: &mut ProjectCompletionWorld,
    username: String,
    email: String,
    password: String,
) -> Result<(), eyre::Report> {
    let user = run_async(
        world
            .accounts
            .register(RegisterUserRequest::new(username, email, password)),
    )
    .wrap_err("register scenario user")?;
    world.owner = Some(user);
    Ok(())
}

#[given(r#"the user owns a project named "{name}""#)]
fn user_owns_project(world: &mut ProjectCompletionWorld, name: String) -> Result<(), eyre::Report> {
    let owner_id = world.owner()?.id();
    let project = run_async(
        world
            .projects
            .create_project(CreateProjectRequest::new(owner_id, name)),
    )
    .wrap_err("create scenario project")?;
    world.project = Some(project);
    Ok(())
}

#[given(r#"the project has a task titled "{title}""#)]
fn project_has_task(world: &mut ProjectCompletionWorld, title: String) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let task = run_async(
        world
            .tasks
            .create_task(CreateTaskRequest::new(project_id, title)),
    )
    .wrap_err("create scenario task")?;
    world.created_tasks.push(task);
    Ok(())
}
