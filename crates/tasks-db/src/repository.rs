use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tasks_core::{NewTask, Task, TaskId, TaskPatch, TaskRepository};

use crate::{models::TaskRecord, DatabaseConfig, Error, Result};

/// Process-wide handle to the SQLite store.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database file, creating it if it does not exist
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| Error::Connection(format!("invalid database url {}: {}", config.url, e)))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        tracing::info!(url = %config.url, "Connected to SQLite");

        Ok(Self { pool })
    }

    /// Private in-memory database. A single connection that never expires,
    /// otherwise every pooled connection would see its own empty database.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Initialize database schema. Safe to run on every startup.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                completed INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        tracing::debug!("Schema ready");

        Ok(())
    }

    /// Wait for checked-out connections and close the pool
    pub async fn close(&self) {
        self.pool.close().await;
    }

    // ========================================================================
    // Task Operations
    // ========================================================================

    pub async fn list_tasks(&self) -> Result<Vec<TaskRecord>> {
        let records =
            sqlx::query_as::<_, TaskRecord>("SELECT id, title, completed FROM tasks ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(records)
    }

    pub async fn get_task(&self, id: TaskId) -> Result<Option<TaskRecord>> {
        let record = sqlx::query_as::<_, TaskRecord>(
            "SELECT id, title, completed FROM tasks WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn insert_task(&self, task: &NewTask) -> Result<TaskRecord> {
        let record = sqlx::query_as::<_, TaskRecord>(
            "INSERT INTO tasks (title, completed) VALUES (?, ?) RETURNING id, title, completed",
        )
        .bind(&task.title)
        .bind(task.completed)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Merge a partial update in one statement, so two concurrent updates
    /// cannot interleave between a read and a write.
    pub async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> Result<Option<TaskRecord>> {
        let record = sqlx::query_as::<_, TaskRecord>(
            r#"
            UPDATE tasks SET
                title = COALESCE(?, title),
                completed = COALESCE(?, completed)
            WHERE id = ?
            RETURNING id, title, completed
            "#,
        )
        .bind(&patch.title)
        .bind(patch.completed)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn delete_task(&self, id: TaskId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl TaskRepository for Database {
    async fn list_tasks(&self) -> tasks_core::Result<Vec<Task>> {
        let records = Database::list_tasks(self).await?;
        Ok(records.into_iter().map(Task::from).collect())
    }

    async fn get_task(&self, id: TaskId) -> tasks_core::Result<Option<Task>> {
        Ok(Database::get_task(self, id).await?.map(Task::from))
    }

    async fn create_task(&self, task: NewTask) -> tasks_core::Result<Task> {
        let record = self.insert_task(&task).await?;
        tracing::info!("Created task: {} ({})", record.title, record.id);
        Ok(record.into())
    }

    async fn update_task(&self, id: TaskId, patch: TaskPatch) -> tasks_core::Result<Option<Task>> {
        Ok(Database::update_task(self, id, &patch).await?.map(Task::from))
    }

    async fn delete_task(&self, id: TaskId) -> tasks_core::Result<bool> {
        let deleted = Database::delete_task(self, id).await?;
        if deleted {
            tracing::info!("Deleted task {}", id);
        }
        Ok(deleted)
    }
}
