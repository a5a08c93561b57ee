//! Application services for task workflow orchestration.

mod workflow;

pub use workflow::{
    CreateTaskRequest, TaskTransition, TaskWorkflowError, TaskWorkflowResult, TaskWorkflowService,
};
