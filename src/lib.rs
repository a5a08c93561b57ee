//! TaskFlow: users, projects and tasks with enforced lifecycle rules.
//!
//! The crate models a small task-management system. Entities guard their own
//! state machines and reject invalid operations with typed errors before any
//! field changes.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Entities, value objects and lifecycle rules
//! - **Ports**: Repository traits consumed by services
//! - **Adapters**: In-memory implementations of the ports
//! - **Services**: Orchestration across repositories
//!
//! # Modules
//!
//! - [`user`]: Accounts, credentials and account status
//! - [`project`]: Projects, their lifecycle and progress
//! - [`task`]: Tasks owned by projects and their workflow
//! - [`http`]: axum routes exposing the services
//! - [`config`] and [`telemetry`]: process setup

pub mod config;
pub mod error;
pub mod http;
mod id;
pub mod project;
pub mod task;
pub mod telemetry;
pub mod user;
