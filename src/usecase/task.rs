use std::sync::Arc;

use crate::error::AppError;
use crate::models::{TaskInput, TaskResponse};
use crate::repository::TaskRepository;
use crate::validation::TaskValidator;

const TASK_NOT_FOUND: &str = "Task not found";

/// Task CRUD, always scoped by the caller's user id.
///
/// A task owned by someone else is reported as `NotFound`, never `Forbidden`,
/// so its existence does not leak across owners.
pub struct TaskUseCase {
    repo: Arc<dyn TaskRepository>,
    validator: Arc<dyn TaskValidator>,
}

impl TaskUseCase {
    pub fn new(repo: Arc<dyn TaskRepository>, validator: Arc<dyn TaskValidator>) -> Self {
        Self { repo, validator }
    }

    pub async fn list_tasks(&self, user_id: i64) -> Result<Vec<TaskResponse>, AppError> {
        let tasks = self.repo.list_tasks(user_id).await?;
        Ok(tasks.into_iter().map(TaskResponse::from).collect())
    }

    pub async fn get_task(&self, user_id: i64, task_id: i64) -> Result<TaskResponse, AppError> {
        self.repo
            .get_task(user_id, task_id)
            .await?
            .map(TaskResponse::from)
            .ok_or_else(|| AppError::NotFound(TASK_NOT_FOUND.into()))
    }

    pub async fn create_task(
        &self,
        user_id: i64,
        input: TaskInput,
    ) -> Result<TaskResponse, AppError> {
        self.validator.validate_task(&input)?;
        let task = self.repo.create_task(user_id, &input.title).await?;
        log::debug!("User {} created task {}", user_id, task.id);
        Ok(task.into())
    }

    pub async fn update_task(
        &self,
        user_id: i64,
        task_id: i64,
        input: TaskInput,
    ) -> Result<TaskResponse, AppError> {
        self.validator.validate_task(&input)?;
        self.repo
            .update_task(user_id, task_id, &input.title)
            .await?
            .map(TaskResponse::from)
            .ok_or_else(|| AppError::NotFound(TASK_NOT_FOUND.into()))
    }

    pub async fn delete_task(&self, user_id: i64, task_id: i64) -> Result<(), AppError> {
        if self.repo.delete_task(user_id, task_id).await? {
            log::debug!("User {} deleted task {}", user_id, task_id);
            Ok(())
        } else {
            Err(AppError::NotFound(TASK_NOT_FOUND.into()))
        }
    }
}
