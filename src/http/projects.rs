//! Project lifecycle endpoints.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use uuid::Uuid;

use super::{
    AppState,
    dto::ProjectResponse,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiQuery, IdPath},
};
use crate::project::{
    domain::{Project, ProjectId, ProjectStatus},
    services::CreateProjectRequest,
};
use crate::user::domain::UserId;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/projects", post(create_project))
        .route(
            "/projects/{id}",
            get(find_by_id).put(update_project).delete(delete_project),
        )
        .route("/projects/{id}/complete", post(complete))
        .route("/projects/{id}/archive", post(archive))
        .route("/projects/{id}/reactivate", post(reactivate))
        .route("/users/{id}/projects", get(list_for_owner))
}

#[derive(Debug, Deserialize)]
struct CreateProjectBody {
    owner_id: Uuid,
    name: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateProjectBody {
    name: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusQuery {
    status: Option<String>,
}

fn parse_status(raw: Option<&str>) -> ApiResult<Option<ProjectStatus>> {
    raw.map(|value| {
        ProjectStatus::try_from(value).map_err(|err| ApiError::invalid_argument(err.to_string()))
    })
    .transpose()
}

fn respond(state: &AppState, project: &Project) -> Json<ProjectResponse> {
    Json(ProjectResponse::new(project, &*state.clock))
}

async fn create_project(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateProjectBody>,
) -> ApiResult<(StatusCode, Json<ProjectResponse>)> {
    let mut request = CreateProjectRequest::new(UserId::from_uuid(body.owner_id), body.name);
    if let Some(description) = body.description {
        request = request.with_description(description);
    }
    let project = state.projects.create_project(request).await?;
    Ok((StatusCode::CREATED, respond(&state, &project)))
}

async fn find_by_id(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<ProjectResponse>> {
    let project_id = ProjectId::from_uuid(id);
    let project = state
        .projects
        .find_by_id(project_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("project not found: {project_id}")))?;
    Ok(respond(&state, &project))
}

async fn list_for_owner(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ApiQuery(query): ApiQuery<StatusQuery>,
) -> ApiResult<Json<Vec<ProjectResponse>>> {
    let status = parse_status(query.status.as_deref())?;
    let projects = state
        .projects
        .list_for_owner(UserId::from_uuid(id), status)
        .await?;
    Ok(Json(
        projects
            .iter()
            .map(|project| ProjectResponse::new(project, &*state.clock))
            .collect(),
    ))
}

async fn update_project(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ApiJson(body): ApiJson<UpdateProjectBody>,
) -> ApiResult<Json<ProjectResponse>> {
    let project = state
        .projects
        .update_project(ProjectId::from_uuid(id), &body.name, body.description)
        .await?;
    Ok(respond(&state, &project))
}

async fn complete(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<ProjectResponse>> {
    let project = state.projects.complete(ProjectId::from_uuid(id)).await?;
    Ok(respond(&state, &project))
}

async fn archive(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<ProjectResponse>> {
    let project = state.projects.archive(ProjectId::from_uuid(id)).await?;
    Ok(respond(&state, &project))
}

async fn reactivate(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<ProjectResponse>> {
    let project = state.projects.reactivate(ProjectId::from_uuid(id)).await?;
    Ok(respond(&state, &project))
}

async fn delete_project(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<StatusCode> {
    state.projects.delete(ProjectId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
