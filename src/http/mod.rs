//! HTTP transport built on axum.
//!
//! Every route lives under the configured API prefix. Handlers translate
//! JSON payloads into service calls and map failures through [`ApiError`],
//! which assigns one status code per [`crate::error::ServiceErrorKind`].

pub mod dto;
pub mod error;
pub mod extract;
mod hello;
mod projects;
mod tasks;
mod users;

use std::sync::Arc;

use axum::Router;
use mockable::DefaultClock;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::project::{
    adapters::memory::InMemoryProjectRepository, services::ProjectLifecycleService,
};
use crate::task::services::TaskWorkflowService;
use crate::user::{adapters::memory::InMemoryUserRepository, services::UserAccountService};

pub use error::{ApiError, ApiResult, ErrorBody};

/// User store backing the server.
pub type UserStore = InMemoryUserRepository<DefaultClock>;

/// Project store backing the server. It also answers task queries.
pub type ProjectStore = InMemoryProjectRepository<DefaultClock>;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    /// Account operations.
    pub users: UserAccountService<UserStore, ProjectStore>,
    /// Project lifecycle operations.
    pub projects: ProjectLifecycleService<ProjectStore, UserStore>,
    /// Task workflow operations.
    pub tasks: TaskWorkflowService<ProjectStore, ProjectStore, UserStore, DefaultClock>,
    /// Clock used for timestamps in responses.
    pub clock: Arc<DefaultClock>,
    /// Application name reported by the health endpoint.
    pub app_name: String,
}

impl AppState {
    /// Wires the services over fresh in-memory stores.
    #[must_use]
    pub fn in_memory(app_name: impl Into<String>) -> Self {
        let clock = Arc::new(DefaultClock);
        let users = Arc::new(UserStore::new(Arc::clone(&clock)));
        let projects = Arc::new(ProjectStore::new(Arc::clone(&clock)));
        Self {
            users: UserAccountService::new(Arc::clone(&users), Arc::clone(&projects)),
            projects: ProjectLifecycleService::new(Arc::clone(&projects), Arc::clone(&users)),
            tasks: TaskWorkflowService::new(
                Arc::clone(&projects),
                Arc::clone(&projects),
                users,
                Arc::clone(&clock),
            ),
            clock,
            app_name: app_name.into(),
        }
    }
}

/// Builds the application router with request tracing.
///
/// An empty `api_prefix` mounts the routes at the root.
#[must_use]
pub fn router(state: AppState, api_prefix: &str) -> Router {
    let api = Router::new()
        .merge(hello::routes())
        .merge(users::routes())
        .merge(projects::routes())
        .merge(tasks::routes())
        .with_state(state);

    let app = if api_prefix.is_empty() || api_prefix == "/" {
        api
    } else {
        Router::new().nest(api_prefix, api)
    };

    app.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
}
