//! Mapping of service failures onto HTTP responses.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::error::ServiceErrorKind;
use crate::project::services::ProjectLifecycleError;
use crate::task::services::TaskWorkflowError;
use crate::user::services::UserAccountError;

/// Body returned for every failed request.
///
/// ```json
/// { "error": "invalid_state", "message": "project is not active" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Machine-readable failure kind.
    pub error: String,
    /// Human-readable description.
    pub message: String,
}

/// Error type returned by every handler.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    kind: ServiceErrorKind,
    message: String,
}

impl ApiError {
    /// Creates an error of the given kind.
    #[must_use]
    pub fn new(kind: ServiceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Shorthand for a malformed request.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::InvalidArgument, message)
    }

    /// Shorthand for a missing resource.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::NotFound, message)
    }

    /// Returns the failure kind.
    #[must_use]
    pub const fn kind(&self) -> ServiceErrorKind {
        self.kind
    }

    /// Returns the HTTP status for the failure kind.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        status_for(self.kind)
    }
}

/// HTTP status used for each failure kind.
#[must_use]
pub const fn status_for(kind: ServiceErrorKind) -> StatusCode {
    match kind {
        ServiceErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
        ServiceErrorKind::InvalidState | ServiceErrorKind::Conflict => StatusCode::CONFLICT,
        ServiceErrorKind::InvariantViolation => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceErrorKind::NotFound => StatusCode::NOT_FOUND,
        ServiceErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.message, "request failed");
        } else {
            tracing::debug!(kind = %self.kind, error = %self.message, "request rejected");
        }
        let body = ErrorBody {
            error: self.kind.as_str().to_owned(),
            message: self.message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<UserAccountError> for ApiError {
    fn from(err: UserAccountError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

impl From<ProjectLifecycleError> for ApiError {
    fn from(err: ProjectLifecycleError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

impl From<TaskWorkflowError> for ApiError {
    fn from(err: TaskWorkflowError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid_argument(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::invalid_argument(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::invalid_argument(rejection.body_text())
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
