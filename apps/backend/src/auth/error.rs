use thiserror::Error;

use super::token::TokenError;
use crate::errors::ErrorCode;

/// Rejection reasons produced while authenticating a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("authentication required")]
    AuthRequired,
    #[error("invalid authorization header format")]
    InvalidAuthFormat,
    #[error("invalid token: {0}")]
    InvalidToken(#[from] TokenError),
}

impl AuthError {
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::AuthRequired => ErrorCode::AuthRequired,
            Self::InvalidAuthFormat => ErrorCode::InvalidAuthFormat,
            Self::InvalidToken(kind) => kind.code(),
        }
    }
}
