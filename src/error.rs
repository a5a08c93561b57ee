//! Failure classification shared by every domain error type.
//!
//! Each bounded context defines its own `thiserror` enum with precise
//! variants. Callers that only need to decide how to react (for example the
//! HTTP layer choosing a status code) use [`ErrorKind`] instead of matching on
//! individual variants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse category of a rejected domain operation.
///
/// All three kinds are raised before any field is assigned, so a rejected
/// operation never leaves an entity partially mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The input was empty, out of bounds or structurally malformed.
    InvalidArgument,
    /// The operation is not permitted from the entity's current state.
    InvalidState,
    /// The operation is well formed but would break a cross-entity rule.
    InvariantViolation,
}

impl ErrorKind {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid_argument",
            Self::InvalidState => "invalid_state",
            Self::InvariantViolation => "invariant_violation",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure category reported by application services.
///
/// Extends [`ErrorKind`] with the outcomes that only arise at the storage
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceErrorKind {
    /// See [`ErrorKind::InvalidArgument`].
    InvalidArgument,
    /// See [`ErrorKind::InvalidState`].
    InvalidState,
    /// See [`ErrorKind::InvariantViolation`].
    InvariantViolation,
    /// The addressed entity does not exist.
    NotFound,
    /// A uniqueness constraint rejected the write.
    Conflict,
    /// Storage failed for reasons unrelated to the request.
    Internal,
}

impl ServiceErrorKind {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid_argument",
            Self::InvalidState => "invalid_state",
            Self::InvariantViolation => "invariant_violation",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Internal => "internal",
        }
    }
}

impl From<ErrorKind> for ServiceErrorKind {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidArgument => Self::InvalidArgument,
            ErrorKind::InvalidState => Self::InvalidState,
            ErrorKind::InvariantViolation => Self::InvariantViolation,
        }
    }
}

impl fmt::Display for ServiceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
