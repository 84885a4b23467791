use std::time::Duration;

use actix_web::error::ResponseError;
use actix_web::http::{header, StatusCode};
use actix_web::HttpResponse;
use thiserror::Error;
use tracing::{error, warn};

use crate::auth::password::PasswordError;
use crate::auth::{AuthError, SigningError};
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::errors::ErrorCode;
use crate::http::{ApiResponse, ErrorBody};
use crate::trace_ctx;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Rate limited, retry after {retry_after:?}")]
    TooManyRequests { retry_after: Duration },
    #[error(transparent)]
    Signing(#[from] SigningError),
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Database unavailable: {detail}")]
    DbUnavailable { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. }
            | AppError::BadRequest { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Conflict { code, .. } => *code,
            AppError::Auth(e) => e.code(),
            AppError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AppError::TooManyRequests { .. } => ErrorCode::RateLimited,
            AppError::Signing(_) => ErrorCode::SigningFailed,
            AppError::Db { .. } => ErrorCode::DbError,
            AppError::DbUnavailable { .. } => ErrorCode::DbUnavailable,
            AppError::Internal { .. } => ErrorCode::Internal,
        }
    }

    /// Client-safe detail. Server-side failures never echo their cause.
    pub fn detail(&self) -> String {
        match self {
            AppError::Validation { detail, .. }
            | AppError::BadRequest { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Conflict { detail, .. } => detail.clone(),
            AppError::Auth(AuthError::AuthRequired) => "Authentication required".to_string(),
            AppError::Auth(AuthError::InvalidAuthFormat) => {
                "Authorization header must be 'Bearer <token>'".to_string()
            }
            AppError::Auth(AuthError::InvalidToken(_)) => "Invalid or expired token".to_string(),
            AppError::InvalidCredentials => "Invalid email or password".to_string(),
            AppError::TooManyRequests { .. } => "Too many requests".to_string(),
            AppError::Signing(_) => "Could not issue token".to_string(),
            AppError::Db { .. } | AppError::Internal { .. } => {
                "Internal server error".to_string()
            }
            AppError::DbUnavailable { .. } => "Service temporarily unavailable".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Auth(_) | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::DbUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Signing(_)
            | AppError::Db { .. }
            | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn db_unavailable(detail: impl Into<String>) -> Self {
        Self::DbUnavailable {
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(detail) => AppError::invalid(ErrorCode::ValidationError, detail),
            DomainError::Conflict(ConflictKind::UniqueEmail, detail) => {
                AppError::conflict(ErrorCode::EmailTaken, detail)
            }
            DomainError::Conflict(_, detail) => AppError::conflict(ErrorCode::Conflict, detail),
            DomainError::NotFound(NotFoundKind::User, detail) => {
                AppError::not_found(ErrorCode::UserNotFound, detail)
            }
            DomainError::NotFound(NotFoundKind::Product, detail) => {
                AppError::not_found(ErrorCode::ProductNotFound, detail)
            }
            DomainError::NotFound(_, detail) => AppError::not_found(ErrorCode::NotFound, detail),
            DomainError::Infra(InfraErrorKind::DbUnavailable, detail) => {
                AppError::db_unavailable(detail)
            }
            DomainError::Infra(_, detail) => AppError::db(detail),
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        crate::infra::db_errors::map_db_err(e).into()
    }
}

impl From<PasswordError> for AppError {
    fn from(e: PasswordError) -> Self {
        AppError::internal(e.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code();
        let trace_id = trace_ctx::trace_id();

        if status.is_server_error() {
            error!(trace_id = %trace_id, code = %code, error = %self, "request failed");
        } else if matches!(self, AppError::Auth(_) | AppError::InvalidCredentials) {
            warn!(trace_id = %trace_id, code = %code, "authentication rejected");
        }

        let body = ApiResponse::failure(
            status.canonical_reason().unwrap_or("Error"),
            ErrorBody {
                code: code.as_str().to_string(),
                detail: self.detail(),
                trace_id: trace_id.clone(),
            },
        );

        let mut builder = HttpResponse::build(status);
        builder.insert_header(("x-trace-id", trace_id));
        match self {
            AppError::Auth(_) | AppError::InvalidCredentials => {
                builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
            }
            AppError::TooManyRequests { retry_after } => {
                let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
                builder.insert_header((header::RETRY_AFTER, secs.max(1).to_string()));
            }
            _ => {}
        }
        builder.json(body)
    }
}
