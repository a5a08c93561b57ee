//! Task workflow for TaskFlow.
//!
//! Tasks are created inside an active project, move through
//! to-do, in-progress, completed and cancelled states, and may be assigned to
//! a user. Task mutations are applied to the owning project aggregate and
//! persisted through [`crate::project::ports::ProjectRepository`]; read-only
//! task queries go through [`ports::TaskQueryRepository`].
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
