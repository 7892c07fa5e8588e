pub mod auth;
pub mod health;
pub mod tasks;

use std::sync::Arc;

use actix_web::{error, web};

use crate::auth::{AuthMiddleware, PasswordHasher, TokenService};
use crate::error::AppError;
use crate::repository::{TaskRepository, UserRepository};
use crate::usecase::{TaskUseCase, UserUseCase};
use crate::validation::InputValidator;

/// Shared application data handed to every worker.
#[derive(Clone)]
pub struct AppState {
    pub users: web::Data<UserUseCase>,
    pub tasks: web::Data<TaskUseCase>,
    pub tokens: web::Data<TokenService>,
}

impl AppState {
    /// Wires the use cases with the default validator.
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        task_repo: Arc<dyn TaskRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: TokenService,
    ) -> Self {
        let validator = Arc::new(InputValidator);
        Self {
            users: web::Data::new(UserUseCase::new(
                user_repo,
                validator.clone(),
                hasher,
                tokens.clone(),
            )),
            tasks: web::Data::new(TaskUseCase::new(task_repo, validator)),
            tokens: web::Data::new(tokens),
        }
    }

    /// Registers the shared data and the extractor error handlers, which turn
    /// unreadable bodies and non-integer ids into 400 responses.
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.users.clone())
            .app_data(self.tasks.clone())
            .app_data(self.tokens.clone())
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                let message = match &err {
                    error::JsonPayloadError::Deserialize(e) => e.to_string(),
                    other => other.to_string(),
                };
                AppError::BadRequest(message).into()
            }))
            .app_data(web::PathConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(format!("Invalid path parameter: {}", err)).into()
            }));
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health)
        .service(auth::signup)
        .service(auth::login)
        .service(
            web::scope("/tasks")
                .wrap(AuthMiddleware)
                .service(tasks::get_tasks)
                .service(tasks::create_task)
                .service(tasks::get_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        );
}
