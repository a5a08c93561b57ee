//! User account endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use serde::Deserialize;

use super::{
    AppState,
    dto::UserResponse,
    error::{ApiError, ApiResult},
    extract::{ApiJson, IdPath},
};
use crate::user::{domain::UserId, services::RegisterUserRequest};

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register))
        .route("/users/{id}", get(find_by_id))
        .route("/users/by-username/{username}", get(find_by_username))
        .route("/users/{id}/activate", post(activate))
        .route("/users/{id}/deactivate", post(deactivate))
        .route("/users/{id}/profile", put(update_profile))
        .route("/users/{id}/password", put(change_password))
}

#[derive(Debug, Deserialize)]
struct RegisterUserBody {
    username: String,
    email: String,
    password: String,
    first_name: Option<String>,
    last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateProfileBody {
    first_name: Option<String>,
    last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChangePasswordBody {
    current_password: String,
    new_password: String,
}

async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterUserBody>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let mut request = RegisterUserRequest::new(body.username, body.email, body.password);
    if let Some(first_name) = body.first_name {
        request = request.with_first_name(first_name);
    }
    if let Some(last_name) = body.last_name {
        request = request.with_last_name(last_name);
    }
    let user = state.users.register(request).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

async fn find_by_id(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<UserResponse>> {
    let user_id = UserId::from_uuid(id);
    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("user not found: {user_id}")))?;
    Ok(Json(UserResponse::from(&user)))
}

async fn find_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("user not found: {username}")))?;
    Ok(Json(UserResponse::from(&user)))
}

async fn activate(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<UserResponse>> {
    let user = state.users.activate(UserId::from_uuid(id)).await?;
    Ok(Json(UserResponse::from(&user)))
}

async fn deactivate(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<UserResponse>> {
    let user = state.users.deactivate(UserId::from_uuid(id)).await?;
    Ok(Json(UserResponse::from(&user)))
}

async fn update_profile(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ApiJson(body): ApiJson<UpdateProfileBody>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .users
        .update_profile(UserId::from_uuid(id), body.first_name, body.last_name)
        .await?;
    Ok(Json(UserResponse::from(&user)))
}

async fn change_password(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ApiJson(body): ApiJson<ChangePasswordBody>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .users
        .change_password(
            UserId::from_uuid(id),
            &body.current_password,
            &body.new_password,
        )
        .await?;
    Ok(Json(UserResponse::from(&user)))
}
