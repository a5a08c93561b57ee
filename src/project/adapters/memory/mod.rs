//! In-memory project storage.
//!
//! The same adapter answers task queries over the tasks held inside stored
//! projects.

mod project;
mod task_query;

pub use project::InMemoryProjectRepository;
