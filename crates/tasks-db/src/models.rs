use sqlx::FromRow;
use tasks_core::Task;

/// Row of the `tasks` table.
#[derive(Debug, Clone, FromRow)]
pub struct TaskRecord {
    pub id: i64,
    pub title: String,
    pub completed: i64,
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        Task {
            id: record.id,
            title: record.title,
            completed: record.completed,
        }
    }
}
