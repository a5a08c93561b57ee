//! Project lifecycle management for TaskFlow.
//!
//! Projects are owned by an active user and own their tasks. The project
//! store is also the task store: tasks are persisted as part of their
//! project aggregate and queried through
//! [`crate::task::ports::TaskQueryRepository`].

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
