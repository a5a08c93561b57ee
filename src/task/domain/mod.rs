//! Domain model for tasks.
//!
//! Tasks carry a status state machine, a priority and an optional due date.
//! They live inside their owning project aggregate and point back to it by
//! identifier.

mod error;
mod priority;
mod task;
mod title;

pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use priority::TaskPriority;
pub use task::{PersistedTaskData, Task, TaskStatus};
pub use title::{MAX_TITLE_LENGTH, MIN_TITLE_LENGTH, TaskTitle};

crate::id::uuid_identifier! {
    /// Unique identifier for a task.
    pub struct TaskId;
}
