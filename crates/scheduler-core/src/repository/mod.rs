use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{CompletionResult, NewTaskData, Task, TaskFilter};
use async_trait::async_trait;
use chrono::NaiveDate;

pub mod tasks;

/// Storage operations for scheduled tasks
#[async_trait]
pub trait TaskRepository {
    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError>;
    async fn find_task_by_id(&self, id: i64) -> Result<Option<Task>, CoreError>;
    async fn find_tasks(&self, filter: &TaskFilter, limit: u32) -> Result<Vec<Task>, CoreError>;
    async fn update_task(&self, task: Task) -> Result<Task, CoreError>;
    async fn delete_task(&self, id: i64) -> Result<(), CoreError>;
    /// Marks a task done as of `today`: one-off tasks are deleted, repeating
    /// tasks move to their next date.
    async fn complete_task(&self, id: i64, today: NaiveDate) -> Result<CompletionResult, CoreError>;
}

/// SQLite implementation of the repository pattern
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the database pool for internal use across modules
    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}
