use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::auth::{AuthError, Identity};
use crate::error::AppError;

/// Reads the [`Identity`] placed by `RequireIdentity`. A handler mounted
/// outside a protected scope gets `AUTH_REQUIRED`.
impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Identity>()
                .cloned()
                .ok_or(AppError::Auth(AuthError::AuthRequired)),
        )
    }
}
