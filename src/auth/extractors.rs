use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;

/// Extracts the authenticated user's ID from the claims `AuthMiddleware`
/// stored in the request extensions.
///
/// Fails with `AppError::Unauthorized` when no claims are present, e.g. on a
/// route the middleware does not wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUserId(pub i64);

impl FromRequest for AuthenticatedUserId {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(AuthenticatedUserId(claims.user_id))),
            None => {
                let err = AppError::Unauthorized("Missing authenticated user".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
