//! Scoped data access.
//!
//! Every task operation takes the owning user's id and applies it as a filter
//! predicate in the query itself, so a task belonging to someone else is
//! indistinguishable from one that does not exist.

pub mod memory;
pub mod task;
pub mod user;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{Task, User};

pub use memory::InMemoryStore;
pub use task::PgTaskRepository;
pub use user::PgUserRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user. Fails with `AppError::Conflict` when the email is taken.
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn list_tasks(&self, user_id: i64) -> Result<Vec<Task>, AppError>;

    async fn get_task(&self, user_id: i64, task_id: i64) -> Result<Option<Task>, AppError>;

    /// Fails with `AppError::Conflict` when the title is already used by any task.
    async fn create_task(&self, user_id: i64, title: &str) -> Result<Task, AppError>;

    /// Returns `None` when no task with `task_id` is owned by `user_id`.
    async fn update_task(
        &self,
        user_id: i64,
        task_id: i64,
        title: &str,
    ) -> Result<Option<Task>, AppError>;

    /// Returns whether a row was removed.
    async fn delete_task(&self, user_id: i64, task_id: i64) -> Result<bool, AppError>;
}
