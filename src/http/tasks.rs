//! Task workflow endpoints.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::{
    AppState,
    dto::TaskResponse,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiQuery, IdPath},
};
use crate::project::domain::ProjectId;
use crate::task::{
    domain::{Task, TaskId, TaskPriority, TaskStatus},
    services::{CreateTaskRequest, TaskTransition},
};
use crate::user::domain::UserId;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/projects/{id}/tasks",
            post(create_task).get(list_for_project),
        )
        .route("/users/{id}/tasks", get(list_for_assignee))
        .route("/tasks/overdue", get(list_overdue))
        .route(
            "/tasks/{id}",
            get(find_by_id).put(update_task).delete(remove_task),
        )
        .route("/tasks/{id}/start", post(start))
        .route("/tasks/{id}/complete", post(complete))
        .route("/tasks/{id}/cancel", post(cancel))
        .route("/tasks/{id}/reopen", post(reopen))
        .route("/tasks/{id}/priority", put(change_priority))
        .route("/tasks/{id}/due-date", put(update_due_date))
        .route("/tasks/{id}/assignee", put(assign).delete(unassign))
}

#[derive(Debug, Deserialize)]
struct CreateTaskBody {
    title: String,
    description: Option<String>,
    priority: Option<String>,
    due_date: Option<DateTime<Utc>>,
    assignee_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
struct UpdateTaskBody {
    title: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PriorityBody {
    priority: String,
}

#[derive(Debug, Deserialize)]
struct DueDateBody {
    due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct AssigneeBody {
    user_id: Uuid,
}

#[derive(Debug, Deserialize)]
struct StatusQuery {
    status: Option<String>,
}

fn parse_priority(raw: &str) -> ApiResult<TaskPriority> {
    TaskPriority::try_from(raw).map_err(|err| ApiError::invalid_argument(err.to_string()))
}

fn parse_status(raw: Option<&str>) -> ApiResult<Option<TaskStatus>> {
    raw.map(|value| {
        TaskStatus::try_from(value).map_err(|err| ApiError::invalid_argument(err.to_string()))
    })
    .transpose()
}

fn respond(state: &AppState, task: &Task) -> Json<TaskResponse> {
    Json(TaskResponse::new(task, &*state.clock))
}

fn respond_list(state: &AppState, tasks: &[Task]) -> Json<Vec<TaskResponse>> {
    Json(TaskResponse::list(tasks, &*state.clock))
}

async fn create_task(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ApiJson(body): ApiJson<CreateTaskBody>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    let mut request = CreateTaskRequest::new(ProjectId::from_uuid(id), body.title);
    if let Some(description) = body.description {
        request = request.with_description(description);
    }
    if let Some(raw) = body.priority.as_deref() {
        request = request.with_priority(parse_priority(raw)?);
    }
    if let Some(due_date) = body.due_date {
        request = request.with_due_date(due_date);
    }
    if let Some(assignee_id) = body.assignee_id {
        request = request.with_assignee(UserId::from_uuid(assignee_id));
    }
    let task = state.tasks.create_task(request).await?;
    Ok((StatusCode::CREATED, respond(&state, &task)))
}

async fn list_for_project(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ApiQuery(query): ApiQuery<StatusQuery>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let status = parse_status(query.status.as_deref())?;
    let tasks = state
        .tasks
        .list_for_project(ProjectId::from_uuid(id), status)
        .await?;
    Ok(respond_list(&state, &tasks))
}

async fn list_for_assignee(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ApiQuery(query): ApiQuery<StatusQuery>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let status = parse_status(query.status.as_deref())?;
    let tasks = state
        .tasks
        .list_for_assignee(UserId::from_uuid(id), status)
        .await?;
    Ok(respond_list(&state, &tasks))
}

async fn list_overdue(State(state): State<AppState>) -> ApiResult<Json<Vec<TaskResponse>>> {
    let tasks = state.tasks.list_overdue().await?;
    Ok(respond_list(&state, &tasks))
}

async fn find_by_id(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<TaskResponse>> {
    let task_id = TaskId::from_uuid(id);
    let task = state
        .tasks
        .find_by_id(task_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("task not found: {task_id}")))?;
    Ok(respond(&state, &task))
}

async fn update_task(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ApiJson(body): ApiJson<UpdateTaskBody>,
) -> ApiResult<Json<TaskResponse>> {
    let task = state
        .tasks
        .update_task(TaskId::from_uuid(id), &body.title, body.description)
        .await?;
    Ok(respond(&state, &task))
}

async fn transition(
    state: &AppState,
    id: Uuid,
    transition: TaskTransition,
) -> ApiResult<Json<TaskResponse>> {
    let task = state
        .tasks
        .transition(TaskId::from_uuid(id), transition)
        .await?;
    Ok(respond(state, &task))
}

async fn start(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<TaskResponse>> {
    transition(&state, id, TaskTransition::Start).await
}

async fn complete(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<TaskResponse>> {
    transition(&state, id, TaskTransition::Complete).await
}

async fn cancel(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<TaskResponse>> {
    transition(&state, id, TaskTransition::Cancel).await
}

async fn reopen(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<TaskResponse>> {
    transition(&state, id, TaskTransition::Reopen).await
}

async fn change_priority(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ApiJson(body): ApiJson<PriorityBody>,
) -> ApiResult<Json<TaskResponse>> {
    let priority = parse_priority(&body.priority)?;
    let task = state
        .tasks
        .change_priority(TaskId::from_uuid(id), priority)
        .await?;
    Ok(respond(&state, &task))
}

async fn update_due_date(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ApiJson(body): ApiJson<DueDateBody>,
) -> ApiResult<Json<TaskResponse>> {
    let task = state
        .tasks
        .update_due_date(TaskId::from_uuid(id), body.due_date)
        .await?;
    Ok(respond(&state, &task))
}

async fn assign(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ApiJson(body): ApiJson<AssigneeBody>,
) -> ApiResult<Json<TaskResponse>> {
    let task = state
        .tasks
        .assign(TaskId::from_uuid(id), UserId::from_uuid(body.user_id))
        .await?;
    Ok(respond(&state, &task))
}

async fn unassign(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<TaskResponse>> {
    let task = state.tasks.unassign(TaskId::from_uuid(id)).await?;
    Ok(respond(&state, &task))
}

async fn remove_task(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<TaskResponse>> {
    let task = state.tasks.remove_task(TaskId::from_uuid(id)).await?;
    Ok(respond(&state, &task))
}
