use crate::{
    auth::AuthenticatedUserId, error::AppError, models::TaskInput, usecase::TaskUseCase,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};

/// Retrieves the authenticated user's tasks, newest first.
///
/// ## Responses:
/// - `200 OK`: JSON array of tasks (`id`, `title`, `created_at`, `updated_at`).
/// - `401 Unauthorized`: Missing or invalid bearer token.
#[get("")]
pub async fn get_tasks(
    tasks: web::Data<TaskUseCase>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let tasks = tasks.list_tasks(user.0).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task owned by the authenticated user.
///
/// ## Request Body:
/// - `title`: 1 to 255 characters, unique across all tasks.
///
/// ## Responses:
/// - `200 OK`: The created task.
/// - `400 Bad Request`: Missing or invalid title.
/// - `401 Unauthorized`: Missing or invalid bearer token.
/// - `409 Conflict`: Another task already uses the title.
#[post("")]
pub async fn create_task(
    tasks: web::Data<TaskUseCase>,
    task_data: web::Json<TaskInput>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let task = tasks.create_task(user.0, task_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Retrieves a specific task by its ID.
///
/// ## Responses:
/// - `200 OK`: The task.
/// - `400 Bad Request`: `task_id` is not an integer.
/// - `404 Not Found`: No such task, or it belongs to another user.
#[get("/{task_id}")]
pub async fn get_task(
    tasks: web::Data<TaskUseCase>,
    task_id: web::Path<i64>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let task = tasks.get_task(user.0, task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Renames a task the authenticated user owns.
///
/// ## Responses:
/// - `200 OK`: The updated task.
/// - `400 Bad Request`: Invalid `task_id` or title.
/// - `404 Not Found`: No such task, or it belongs to another user.
/// - `409 Conflict`: Another task already uses the title.
#[put("/{task_id}")]
pub async fn update_task(
    tasks: web::Data<TaskUseCase>,
    task_id: web::Path<i64>,
    task_data: web::Json<TaskInput>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let task = tasks
        .update_task(user.0, task_id.into_inner(), task_data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task the authenticated user owns.
///
/// ## Responses:
/// - `200 OK`: `"Task deleted"`.
/// - `400 Bad Request`: `task_id` is not an integer.
/// - `404 Not Found`: No such task (including one already deleted), or it belongs to another user.
#[delete("/{task_id}")]
pub async fn delete_task(
    tasks: web::Data<TaskUseCase>,
    task_id: web::Path<i64>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    tasks.delete_task(user.0, task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json("Task deleted"))
}
