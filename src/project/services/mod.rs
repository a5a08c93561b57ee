//! Application services for project lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    CreateProjectRequest, ProjectLifecycleError, ProjectLifecycleResult, ProjectLifecycleService,
};
