//! Greeting and health endpoints.

use axum::{Json, Router, extract::State, routing::get};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AppState, extract::ApiQuery};

const BASIC_GREETING: &str = "Hello from TaskFlow API! Welcome to our task management system.";
const DEFAULT_NAME: &str = "World";

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/hello", get(hello))
        .route("/hello/personalized", get(personalized))
        .route("/hello/health", get(health))
}

#[derive(Debug, Serialize)]
struct Greeting {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    status: &'static str,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct NameQuery {
    name: Option<String>,
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    application: String,
    version: &'static str,
    timestamp: DateTime<Utc>,
}

/// Greets `name`, falling back to the basic greeting for a blank name.
fn personalized_greeting(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return BASIC_GREETING.to_owned();
    }
    format!("Hello {trimmed}! Welcome to TaskFlow API. Ready to manage your tasks?")
}

async fn hello(State(state): State<AppState>) -> Json<Greeting> {
    debug!("hello endpoint called");
    Json(Greeting {
        message: BASIC_GREETING.to_owned(),
        name: None,
        status: "success",
        timestamp: state.clock.utc(),
    })
}

async fn personalized(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<NameQuery>,
) -> Json<Greeting> {
    let name = query.name.unwrap_or_else(|| DEFAULT_NAME.to_owned());
    debug!(%name, "personalized hello endpoint called");
    Json(Greeting {
        message: personalized_greeting(&name),
        name: Some(name),
        status: "success",
        timestamp: state.clock.utc(),
    })
}

async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "UP",
        application: state.app_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
        timestamp: state.clock.utc(),
    })
}
