use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A user as stored in the `users` table.
///
/// `password_hash` always holds a bcrypt digest, never the raw password, and is
/// skipped during serialization.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Credentials submitted to `/signup` and `/login`.
#[derive(Clone, Deserialize, Validate)]
pub struct UserInput {
    /// Between 1 and 30 characters.
    #[validate(length(min = 1, max = 30, message = "email must be between 1 and 30 characters"))]
    pub email: String,
    /// Between 6 and 30 characters.
    #[validate(length(min = 6, max = 30, message = "password must be between 6 and 30 characters"))]
    pub password: String,
}

impl std::fmt::Debug for UserInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserInput")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Response-safe projection of a [`User`]. Carries no credential field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}

/// Body returned by a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The signed bearer token.
    pub token: String,
}
