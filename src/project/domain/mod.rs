//! Domain model for projects.
//!
//! A [`Project`] owns its tasks and derives progress from them. Completion
//! is refused while any owned task is still open.

mod error;
mod name;
mod project;
mod status;

pub use error::{ParseProjectStatusError, ProjectDomainError};
pub use name::ProjectName;
pub use project::{PersistedProjectData, Project};
pub use status::ProjectStatus;

crate::id::uuid_identifier! {
    /// Unique identifier for a project.
    pub struct ProjectId;
}
