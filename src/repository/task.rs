use async_trait::async_trait;
use sqlx::PgPool;

use super::TaskRepository;
use crate::error::AppError;
use crate::models::Task;

pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// SQLSTATE reported by Postgres for foreign key violations.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Maps insert and update failures: a taken title is a conflict, and a
/// missing owner means the token outlived its account.
fn write_error(error: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &error {
        if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) {
            return AppError::Unauthorized("Account no longer exists".into());
        }
    }
    match AppError::from(error) {
        AppError::Conflict(_) => AppError::Conflict("Task title already exists".into()),
        other => other,
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn list_tasks(&self, user_id: i64) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, title, created_at, updated_at, user_id
             FROM tasks WHERE user_id = $1
             ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn get_task(&self, user_id: i64, task_id: i64) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "SELECT id, title, created_at, updated_at, user_id
             FROM tasks WHERE id = $1 AND user_id = $2",
        )
        .bind(task_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn create_task(&self, user_id: i64, title: &str) -> Result<Task, AppError> {
        sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (title, user_id)
             VALUES ($1, $2)
             RETURNING id, title, created_at, updated_at, user_id",
        )
        .bind(title)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error)
    }

    async fn update_task(
        &self,
        user_id: i64,
        task_id: i64,
        title: &str,
    ) -> Result<Option<Task>, AppError> {
        sqlx::query_as::<_, Task>(
            "UPDATE tasks
             SET title = $1, updated_at = NOW()
             WHERE id = $2 AND user_id = $3
             RETURNING id, title, created_at, updated_at, user_id",
        )
        .bind(title)
        .bind(task_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error)
    }

    async fn delete_task(&self, user_id: i64, task_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(task_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
