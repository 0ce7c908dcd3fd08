use async_trait::async_trait;

use crate::{NewTask, Result, Task, TaskId, TaskPatch};

/// Persistence seam for tasks. Every method maps to exactly one statement.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// All stored tasks, unfiltered and unpaginated.
    async fn list_tasks(&self) -> Result<Vec<Task>>;

    async fn get_task(&self, id: TaskId) -> Result<Option<Task>>;

    /// Insert a task; storage assigns the id.
    async fn create_task(&self, task: NewTask) -> Result<Task>;

    /// Merge `patch` into the stored row. `None` when no row has this id.
    async fn update_task(&self, id: TaskId, patch: TaskPatch) -> Result<Option<Task>>;

    /// `true` if a row was removed.
    async fn delete_task(&self, id: TaskId) -> Result<bool>;
}
