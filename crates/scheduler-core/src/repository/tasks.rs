use crate::dates::format_date;
use crate::error::CoreError;
use crate::models::{CompletionResult, NewTaskData, Task, TaskFilter};
use crate::recurrence::next_date;
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite};

const TASK_COLUMNS: &str = "id, date, title, comment, repeat";

#[async_trait]
impl super::TaskRepository for SqliteRepository {
    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError> {
        let task = sqlx::query_as(
            r#"INSERT INTO scheduler (date, title, comment, repeat)
            VALUES ($1, $2, $3, $4)
            RETURNING id, date, title, comment, repeat
            "#,
        )
        .bind(data.date)
        .bind(data.title)
        .bind(data.comment)
        .bind(data.repeat)
        .fetch_one(self.pool())
        .await?;
        Ok(task)
    }

    async fn find_task_by_id(&self, id: i64) -> Result<Option<Task>, CoreError> {
        let task = sqlx::query_as("SELECT id, date, title, comment, repeat FROM scheduler WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(task)
    }

    async fn find_tasks(&self, filter: &TaskFilter, limit: u32) -> Result<Vec<Task>, CoreError> {
        let mut query_builder: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT ");
        query_builder.push(TASK_COLUMNS);
        query_builder.push(" FROM scheduler");

        match filter {
            TaskFilter::All => {}
            TaskFilter::Date(date) => {
                query_builder.push(" WHERE date = ");
                query_builder.push_bind(format_date(*date));
            }
            TaskFilter::Text(text) => {
                let mut pattern = String::with_capacity(text.len() + 2);
                pattern.push('%');
                pattern.push_str(text);
                pattern.push('%');

                query_builder.push(" WHERE title LIKE ");
                query_builder.push_bind(pattern.clone());
                query_builder.push(" OR comment LIKE ");
                query_builder.push_bind(pattern);
            }
        }

        query_builder.push(" ORDER BY date, id LIMIT ");
        query_builder.push_bind(i64::from(limit));

        let tasks = query_builder.build_query_as().fetch_all(self.pool()).await?;
        Ok(tasks)
    }

    async fn update_task(&self, task: Task) -> Result<Task, CoreError> {
        let updated: Option<Task> = sqlx::query_as(
            r#"UPDATE scheduler
            SET date = $1, title = $2, comment = $3, repeat = $4
            WHERE id = $5
            RETURNING id, date, title, comment, repeat
            "#,
        )
        .bind(&task.date)
        .bind(&task.title)
        .bind(&task.comment)
        .bind(&task.repeat)
        .bind(task.id)
        .fetch_optional(self.pool())
        .await?;

        updated.ok_or_else(|| CoreError::NotFound(task.id.to_string()))
    }

    async fn delete_task(&self, id: i64) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM scheduler WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn complete_task(&self, id: i64, today: NaiveDate) -> Result<CompletionResult, CoreError> {
        let mut tx = self.pool().begin().await?;

        let task: Task = sqlx::query_as("SELECT id, date, title, comment, repeat FROM scheduler WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        if task.repeat.is_empty() {
            sqlx::query("DELETE FROM scheduler WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;
            return Ok(CompletionResult::Deleted(task));
        }

        let next = next_date(today, &task.date, &task.repeat)?;
        let rescheduled: Task = sqlx::query_as(
            r#"UPDATE scheduler
            SET date = $1
            WHERE id = $2
            RETURNING id, date, title, comment, repeat
            "#,
        )
        .bind(next)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(CompletionResult::Rescheduled(rescheduled))
    }
}
