use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{TaskRepository, UserRepository};
use crate::error::AppError;
use crate::models::{Task, User};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    tasks: Vec<Task>,
    next_user_id: i64,
    next_task_id: i64,
}

/// A process-local store with the same constraints as the SQL schema:
/// unique emails, globally unique task titles and cascading deletes.
///
/// Backs the test suites.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes a user and, like the foreign key, every task they own.
    pub async fn remove_user(&self, user_id: i64) -> bool {
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|user| user.id != user_id);
        tables.tasks.retain(|task| task.user_id != user_id);
        tables.users.len() != before
    }

    pub async fn task_count(&self) -> usize {
        self.tables.read().await.tasks.len()
    }
}

impl Tables {
    fn title_taken(&self, title: &str, except_id: Option<i64>) -> bool {
        self.tasks
            .iter()
            .any(|task| task.title == title && Some(task.id) != except_id)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|user| user.email == email) {
            return Err(AppError::Conflict("Email already registered".into()));
        }

        tables.next_user_id += 1;
        let now = Utc::now();
        let user = User {
            id: tables.next_user_id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|user| user.email == email).cloned())
    }
}

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn list_tasks(&self, user_id: i64) -> Result<Vec<Task>, AppError> {
        let tables = self.tables.read().await;
        let mut tasks: Vec<Task> = tables
            .tasks
            .iter()
            .filter(|task| task.user_id == user_id)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(tasks)
    }

    async fn get_task(&self, user_id: i64, task_id: i64) -> Result<Option<Task>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .tasks
            .iter()
            .find(|task| task.id == task_id && task.user_id == user_id)
            .cloned())
    }

    async fn create_task(&self, user_id: i64, title: &str) -> Result<Task, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.users.iter().any(|user| user.id == user_id) {
            return Err(AppError::Unauthorized("Account no longer exists".into()));
        }
        if tables.title_taken(title, None) {
            return Err(AppError::Conflict("Task title already exists".into()));
        }

        tables.next_task_id += 1;
        let now = Utc::now();
        let task = Task {
            id: tables.next_task_id,
            title: title.to_string(),
            created_at: now,
            updated_at: now,
            user_id,
        };
        tables.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(
        &self,
        user_id: i64,
        task_id: i64,
        title: &str,
    ) -> Result<Option<Task>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(index) = tables
            .tasks
            .iter()
            .position(|task| task.id == task_id && task.user_id == user_id)
        else {
            return Ok(None);
        };
        if tables.title_taken(title, Some(task_id)) {
            return Err(AppError::Conflict("Task title already exists".into()));
        }

        let task = &mut tables.tasks[index];
        task.title = title.to_string();
        task.updated_at = Utc::now();
        Ok(Some(task.clone()))
    }

    async fn delete_task(&self, user_id: i64, task_id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let before = tables.tasks.len();
        tables
            .tasks
            .retain(|task| !(task.id == task_id && task.user_id == user_id));
        Ok(tables.tasks.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[actix_rt::test]
    async fn test_duplicate_email_conflicts() {
        let store = InMemoryStore::new();
        let user = store.create_user("a@b.com", "hash").await.unwrap();
        assert_eq!(user.id, 1);

        let err = store.create_user("a@b.com", "other").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // Case-sensitive, like the default Postgres collation.
        assert!(store.create_user("A@b.com", "hash").await.is_ok());
    }

    #[actix_rt::test]
    async fn test_tasks_are_scoped_to_owner() {
        let store = InMemoryStore::new();
        let alice = store.create_user("alice@x.io", "hash").await.unwrap();
        let bob = store.create_user("bob@x.io", "hash").await.unwrap();
        let task = store.create_task(alice.id, "Alice task").await.unwrap();

        assert_eq!(store.get_task(bob.id, task.id).await.unwrap(), None);
        assert_eq!(store.update_task(bob.id, task.id, "Stolen").await.unwrap(), None);
        assert!(!store.delete_task(bob.id, task.id).await.unwrap());
        assert!(store.list_tasks(bob.id).await.unwrap().is_empty());

        assert_eq!(
            store.get_task(alice.id, task.id).await.unwrap(),
            Some(task.clone())
        );
    }

    #[actix_rt::test]
    async fn test_titles_are_globally_unique() {
        let store = InMemoryStore::new();
        let alice = store.create_user("alice@x.io", "hash").await.unwrap();
        let bob = store.create_user("bob@x.io", "hash").await.unwrap();
        store.create_task(alice.id, "Shared title").await.unwrap();

        let err = store.create_task(bob.id, "Shared title").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // Renaming a task to its own title is not a conflict.
        let task = store.create_task(bob.id, "Bob task").await.unwrap();
        assert!(store
            .update_task(bob.id, task.id, "Bob task")
            .await
            .unwrap()
            .is_some());
    }

    #[actix_rt::test]
    async fn test_removing_user_cascades_to_tasks() {
        let store = InMemoryStore::new();
        let alice = store.create_user("alice@x.io", "hash").await.unwrap();
        let bob = store.create_user("bob@x.io", "hash").await.unwrap();
        store.create_task(alice.id, "One").await.unwrap();
        store.create_task(alice.id, "Two").await.unwrap();
        store.create_task(bob.id, "Three").await.unwrap();

        assert!(store.remove_user(alice.id).await);
        assert_eq!(store.task_count().await, 1);
        assert_eq!(
            store.create_task(alice.id, "Four").await.unwrap_err(),
            AppError::Unauthorized("Account no longer exists".into())
        );
    }

    #[actix_rt::test]
    async fn test_list_is_newest_first() {
        let store = InMemoryStore::new();
        let alice = store.create_user("alice@x.io", "hash").await.unwrap();
        store.create_task(alice.id, "First").await.unwrap();
        store.create_task(alice.id, "Second").await.unwrap();

        let titles: Vec<String> = store
            .list_tasks(alice.id)
            .await
            .unwrap()
            .into_iter()
            .map(|task| task.title)
            .collect();
        assert_eq!(titles, vec!["Second".to_string(), "First".to_string()]);
    }
}
