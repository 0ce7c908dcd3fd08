pub mod task;
pub mod repository;
pub mod error;

// Re-exports
pub use task::{parse_task_id, Completion, NewTask, Task, TaskId, TaskPatch};
pub use repository::TaskRepository;
pub use error::{Error, Result};
