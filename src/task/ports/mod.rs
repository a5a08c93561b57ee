//! Port contracts for task lookup.

pub mod repository;

pub use repository::{TaskQueryRepository, TaskRepositoryError, TaskRepositoryResult};
