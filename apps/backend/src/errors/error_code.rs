//! Error codes for the catalog API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the `error.code`
//! string in HTTP responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// No credentials were presented
    AuthRequired,
    /// Authorization header is not `Bearer <token>`
    InvalidAuthFormat,
    /// Token is not a well-formed JWS
    MalformedToken,
    /// Token header names a non-HMAC algorithm
    UnexpectedAlgorithm,
    /// Token signature does not verify
    BadSignature,
    /// Token expiry has passed
    TokenExpired,
    /// Token has no usable subject
    MissingSubjectClaim,
    /// Email/password pair did not match
    InvalidCredentials,
    /// Current password did not match on change-password
    InvalidCurrentPassword,
    /// Token could not be signed
    SigningFailed,

    // Request validation
    ValidationError,
    BadRequest,
    InvalidEmail,
    InvalidPassword,
    InvalidName,
    InvalidPrice,
    InvalidProductId,

    // Not found
    UserNotFound,
    ProductNotFound,
    NotFound,

    // Conflicts
    EmailTaken,
    Conflict,

    // Throttling
    RateLimited,

    // System
    DbError,
    DbUnavailable,
    Internal,
}

impl ErrorCode {
    /// The exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AuthRequired => "AUTH_REQUIRED",
            Self::InvalidAuthFormat => "INVALID_AUTH_FORMAT",
            Self::MalformedToken => "MALFORMED_TOKEN",
            Self::UnexpectedAlgorithm => "UNEXPECTED_ALGORITHM",
            Self::BadSignature => "BAD_SIGNATURE",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::MissingSubjectClaim => "MISSING_SUBJECT_CLAIM",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidCurrentPassword => "INVALID_CURRENT_PASSWORD",
            Self::SigningFailed => "SIGNING_FAILED",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::InvalidName => "INVALID_NAME",
            Self::InvalidPrice => "INVALID_PRICE",
            Self::InvalidProductId => "INVALID_PRODUCT_ID",

            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ProductNotFound => "PRODUCT_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::EmailTaken => "EMAIL_TAKEN",
            Self::Conflict => "CONFLICT",

            Self::RateLimited => "RATE_LIMITED",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
