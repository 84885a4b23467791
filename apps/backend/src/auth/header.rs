//! `Authorization` header handling.
//!
//! Only the canonical `Bearer <token>` form is accepted. The scheme is
//! matched case-insensitively; a bare token without a scheme is rejected.

use actix_web::http::header::HeaderValue;

use super::error::AuthError;
use super::identity::Identity;
use super::token::TokenValidator;

/// Extract the token from an `Authorization` header value.
pub fn bearer_token(value: &HeaderValue) -> Result<&str, AuthError> {
    let raw = value.to_str().map_err(|_| AuthError::InvalidAuthFormat)?;
    if raw.trim().is_empty() {
        return Err(AuthError::AuthRequired);
    }

    let mut parts = raw.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("Bearer") => Ok(token),
        _ => Err(AuthError::InvalidAuthFormat),
    }
}

/// Decide whether a request carrying `header` is authenticated.
pub fn authenticate(
    header: Option<&HeaderValue>,
    validator: &dyn TokenValidator,
) -> Result<Identity, AuthError> {
    let header = header.ok_or(AuthError::AuthRequired)?;
    let token = bearer_token(header)?;
    let subject = validator.validate(token)?;
    Ok(Identity::new(subject))
}
