use crate::{
    error::AppError,
    models::{AuthResponse, UserInput},
    usecase::UserUseCase,
};
use actix_web::{post, web, HttpResponse, Responder};

/// Register a new user
///
/// Responds with the user's id and email; the password hash is never returned.
///
/// ## Responses:
/// - `200 OK`: `{"id": 1, "email": "a@b.com"}`.
/// - `400 Bad Request`: Missing fields or input outside the length bounds.
/// - `409 Conflict`: The email is already registered.
#[post("/signup")]
pub async fn signup(
    users: web::Data<UserUseCase>,
    signup_data: web::Json<UserInput>,
) -> Result<impl Responder, AppError> {
    let user = users.sign_up(signup_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Login user
///
/// Authenticates a user and returns a bearer token valid for 24 hours.
///
/// ## Responses:
/// - `200 OK`: `{"token": "..."}`.
/// - `400 Bad Request`: Missing fields or input outside the length bounds.
/// - `401 Unauthorized`: Unknown email or wrong password (indistinguishable).
#[post("/login")]
pub async fn login(
    users: web::Data<UserUseCase>,
    login_data: web::Json<UserInput>,
) -> Result<impl Responder, AppError> {
    let token = users.log_in(login_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(AuthResponse { token }))
}
