//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every layer (configuration, repositories, use cases, token handling) reports failures
//! through it, so the HTTP boundary can map each kind onto its proper status code:
//! caller mistakes become 4xx responses, and only infrastructure faults become 5xx.
//!
//! `AppError` implements `actix_web::error::ResponseError` to convert application errors
//! into JSON responses of the form `{"error": "<message>"}`. `From` implementations for
//! `sqlx::Error`, `validator::ValidationErrors` and `bcrypt::BcryptError` allow the `?`
//! operator to be used directly on those results.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// SQLSTATE reported by Postgres for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Represents all possible errors that can occur within the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Input failed structural validation (HTTP 400).
    ValidationError(String),
    /// A malformed request, such as a non-integer path parameter or unreadable body (HTTP 400).
    BadRequest(String),
    /// Bad credentials, or a missing, expired or forged bearer token (HTTP 401).
    Unauthorized(String),
    /// The record does not exist or is not visible to the caller (HTTP 404).
    NotFound(String),
    /// A uniqueness constraint was violated in the store (HTTP 409).
    Conflict(String),
    /// Any other failure reported by the store (HTTP 500).
    DatabaseError(String),
    /// Unexpected server-side failure, e.g. hashing or token signing (HTTP 500).
    InternalServerError(String),
    /// The process was started with missing or invalid configuration (HTTP 500).
    ConfigError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Configuration Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    fn message(&self) -> &str {
        match self {
            AppError::ValidationError(msg)
            | AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::DatabaseError(msg)
            | AppError::InternalServerError(msg)
            | AppError::ConfigError(msg) => msg,
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("{}", self);
            // Store and configuration details stay in the log.
            return HttpResponse::build(self.status_code()).json(json!({
                "error": "Internal server error"
            }));
        }
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.message()
        }))
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` becomes `NotFound`, unique violations become `Conflict`,
/// and everything else is a `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(ref db_error)
                if db_error.code().as_deref() == Some(UNIQUE_VIOLATION) =>
            {
                AppError::Conflict(db_error.message().to_string())
            }
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(error: sqlx::migrate::MigrateError) -> AppError {
        AppError::DatabaseError(format!("Migration failed: {}", error))
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
