//! Repository tests against a live Postgres.
//!
//! They run only when `DATABASE_URL` is set (directly or through `.env`) and
//! are skipped otherwise. Every test uses unique emails and titles, so they can
//! share one database and run in parallel.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::Utc;
use dotenv::dotenv;
use pretty_assertions::assert_eq;
use sqlx::PgPool;
use tasknest::config::DatabaseConfig;
use tasknest::db;
use tasknest::models::{TaskInput, User};
use tasknest::repository::{PgTaskRepository, PgUserRepository, TaskRepository, UserRepository};
use tasknest::usecase::TaskUseCase;
use tasknest::validation::InputValidator;
use tasknest::AppError;

static COUNTER: AtomicUsize = AtomicUsize::new(0);

async fn test_pool() -> Option<PgPool> {
    dotenv().ok();
    let config = match DatabaseConfig::from_env() {
        Ok(config) => config,
        Err(_) => {
            eprintln!("DATABASE_URL not set, skipping Postgres test");
            return None;
        }
    };
    let pool = db::connect(&config)
        .await
        .expect("Failed to connect to test DB");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    Some(pool)
}

/// A value no other test run has used.
fn unique(prefix: &str) -> String {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!(
        "{}-{}-{}-{}",
        prefix,
        std::process::id(),
        Utc::now().timestamp_micros(),
        n
    )
}

async fn new_user(users: &PgUserRepository) -> User {
    let email = format!("{}@t.io", unique("pg"));
    users
        .create_user(&email, "$2b$04$not.a.real.digest")
        .await
        .expect("Failed to create user")
}

#[actix_rt::test]
async fn test_pg_task_operations_are_scoped_by_owner() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let users = PgUserRepository::new(pool.clone());
    let tasks = PgTaskRepository::new(pool.clone());
    let alice = new_user(&users).await;
    let bob = new_user(&users).await;

    let title = unique("alice-task");
    let task = tasks.create_task(alice.id, &title).await.unwrap();
    assert_eq!(task.user_id, alice.id);
    assert_eq!(task.title, title);

    // Bob sees nothing and changes nothing
    assert_eq!(tasks.get_task(bob.id, task.id).await.unwrap(), None);
    assert_eq!(
        tasks
            .update_task(bob.id, task.id, &unique("stolen"))
            .await
            .unwrap(),
        None
    );
    assert!(!tasks.delete_task(bob.id, task.id).await.unwrap());
    assert!(tasks.list_tasks(bob.id).await.unwrap().is_empty());

    // Alice still has it, untouched
    let fetched = tasks.get_task(alice.id, task.id).await.unwrap();
    assert_eq!(fetched, Some(task.clone()));

    let renamed = unique("alice-renamed");
    let updated = tasks
        .update_task(alice.id, task.id, &renamed)
        .await
        .unwrap()
        .expect("owner can update");
    assert_eq!(updated.id, task.id);
    assert_eq!(updated.title, renamed);
    assert_eq!(updated.created_at, task.created_at);
    assert!(updated.updated_at >= task.updated_at);

    assert!(tasks.delete_task(alice.id, task.id).await.unwrap());
    assert!(!tasks.delete_task(alice.id, task.id).await.unwrap());
}

#[actix_rt::test]
async fn test_pg_use_case_reports_missing_tasks_as_not_found() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let users = PgUserRepository::new(pool.clone());
    let alice = new_user(&users).await;
    let bob = new_user(&users).await;
    let use_case = TaskUseCase::new(
        Arc::new(PgTaskRepository::new(pool.clone())),
        Arc::new(InputValidator),
    );

    let task = use_case
        .create_task(
            alice.id,
            TaskInput {
                title: unique("usecase-task"),
            },
        )
        .await
        .unwrap();

    let err = use_case.get_task(bob.id, task.id).await.unwrap_err();
    assert_eq!(err, AppError::NotFound("Task not found".into()));

    use_case.delete_task(alice.id, task.id).await.unwrap();
    let err = use_case.delete_task(alice.id, task.id).await.unwrap_err();
    assert_eq!(err, AppError::NotFound("Task not found".into()));
}

#[actix_rt::test]
async fn test_pg_unique_violations_are_conflicts() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let users = PgUserRepository::new(pool.clone());
    let tasks = PgTaskRepository::new(pool.clone());

    let alice = new_user(&users).await;
    let err = users
        .create_user(&alice.email, "$2b$04$another.digest")
        .await
        .unwrap_err();
    assert_eq!(err, AppError::Conflict("Email already registered".into()));

    let found = users.find_by_email(&alice.email).await.unwrap();
    assert_eq!(found.map(|user| user.id), Some(alice.id));

    // Titles are unique across owners, on insert and on rename
    let bob = new_user(&users).await;
    let title = unique("shared-title");
    tasks.create_task(alice.id, &title).await.unwrap();

    let err = tasks.create_task(bob.id, &title).await.unwrap_err();
    assert_eq!(err, AppError::Conflict("Task title already exists".into()));

    let bobs = tasks.create_task(bob.id, &unique("bob-task")).await.unwrap();
    let err = tasks
        .update_task(bob.id, bobs.id, &title)
        .await
        .unwrap_err();
    assert_eq!(err, AppError::Conflict("Task title already exists".into()));

    // Keeping its own title is not a conflict
    let same = tasks
        .update_task(bob.id, bobs.id, &bobs.title)
        .await
        .unwrap();
    assert_eq!(same.map(|task| task.title), Some(bobs.title));
}

#[actix_rt::test]
async fn test_pg_deleting_user_cascades_to_tasks() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let users = PgUserRepository::new(pool.clone());
    let tasks = PgTaskRepository::new(pool.clone());
    let user = new_user(&users).await;
    tasks.create_task(user.id, &unique("doomed-1")).await.unwrap();
    tasks.create_task(user.id, &unique("doomed-2")).await.unwrap();

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();

    let (remaining,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE user_id = $1")
        .bind(user.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    // A token that outlived its account cannot create tasks
    let err = tasks
        .create_task(user.id, &unique("orphan"))
        .await
        .unwrap_err();
    assert_eq!(err, AppError::Unauthorized("Account no longer exists".into()));
}
