//! Access token issuance and validation.
//!
//! Tokens are compact JWS strings signed with an HMAC key. Validation runs
//! in a fixed order and stops at the first failure:
//!
//! 1. structure (three segments, decodable header and payload)
//! 2. algorithm family (HS256/HS384/HS512 only)
//! 3. signature
//! 4. expiry against the injected [`Clock`]
//! 5. subject

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Deserialize;
use thiserror::Error;
use time::OffsetDateTime;

use super::claims::{Claims, RawClaims};
use super::clock::{Clock, SystemClock};
use crate::errors::ErrorCode;
use crate::state::security_config::SecurityConfig;

pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Why a presented token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is malformed")]
    MalformedToken,
    #[error("token uses an unexpected signing algorithm")]
    UnexpectedAlgorithm,
    #[error("token signature does not verify")]
    BadSignature,
    #[error("token has expired")]
    Expired,
    #[error("token has no subject")]
    MissingSubjectClaim,
}

impl TokenError {
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MalformedToken => ErrorCode::MalformedToken,
            Self::UnexpectedAlgorithm => ErrorCode::UnexpectedAlgorithm,
            Self::BadSignature => ErrorCode::BadSignature,
            Self::Expired => ErrorCode::TokenExpired,
            Self::MissingSubjectClaim => ErrorCode::MissingSubjectClaim,
        }
    }
}

#[derive(Debug, Error)]
#[error("failed to sign token: {reason}")]
pub struct SigningError {
    reason: String,
}

impl SigningError {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A freshly signed token and its expiry.
#[derive(Clone)]
pub struct IssuedToken {
    pub token: String,
    pub issued_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
}

impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedToken")
            .field("token", &"[REDACTED]")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

pub trait TokenIssuer: Send + Sync {
    fn issue(&self, subject: &str) -> Result<IssuedToken, SigningError>;
}

pub trait TokenValidator: Send + Sync {
    /// Returns the token's subject.
    fn validate(&self, token: &str) -> Result<String, TokenError>;
}

#[derive(Deserialize)]
struct PeekedHeader {
    alg: String,
}

/// HMAC token service. Keys are derived once from the process secret.
pub struct TokenService {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    pub fn new(security: &SecurityConfig) -> Self {
        Self::with_clock(security, Arc::new(SystemClock))
    }

    pub fn with_clock(security: &SecurityConfig, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(security.algorithm);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        // Expiry is checked against our own clock with zero leeway.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        Self {
            algorithm: security.algorithm,
            encoding_key: EncodingKey::from_secret(security.jwt_secret()),
            decoding_key: DecodingKey::from_secret(security.jwt_secret()),
            validation,
            ttl: security.token_ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Checks segments, header and payload encoding, then the algorithm
    /// family. Returns the signature segment.
    fn check_structure(token: &str) -> Result<&str, TokenError> {
        let mut segments = token.split('.');
        let header = segments.next().ok_or(TokenError::MalformedToken)?;
        let payload = segments.next().ok_or(TokenError::MalformedToken)?;
        let signature = segments.next().ok_or(TokenError::MalformedToken)?;
        if segments.next().is_some() || header.is_empty() || payload.is_empty() {
            return Err(TokenError::MalformedToken);
        }

        let header_bytes = URL_SAFE_NO_PAD
            .decode(header)
            .map_err(|_| TokenError::MalformedToken)?;
        let peeked: PeekedHeader =
            serde_json::from_slice(&header_bytes).map_err(|_| TokenError::MalformedToken)?;
        URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| TokenError::MalformedToken)?;

        match peeked.alg.as_str() {
            "HS256" | "HS384" | "HS512" => Ok(signature),
            _ => Err(TokenError::UnexpectedAlgorithm),
        }
    }
}

impl TokenIssuer for TokenService {
    fn issue(&self, subject: &str) -> Result<IssuedToken, SigningError> {
        if subject.is_empty() {
            return Err(SigningError::new("subject must not be empty"));
        }

        let issued_at = self.clock.now().replace_nanosecond(0).map_err(|e| {
            SigningError::new(format!("failed to truncate issue time: {e}"))
        })?;
        let expires_at = issued_at
            .checked_add(self.ttl.try_into().map_err(|_| SigningError::new("ttl out of range"))?)
            .ok_or_else(|| SigningError::new("expiry out of range"))?;

        let claims = Claims {
            sub: subject.to_string(),
            iat: issued_at.unix_timestamp(),
            exp: expires_at.unix_timestamp(),
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| SigningError::new(e.to_string()))?;

        Ok(IssuedToken {
            token,
            issued_at,
            expires_at,
        })
    }
}

impl TokenValidator for TokenService {
    fn validate(&self, token: &str) -> Result<String, TokenError> {
        let signature = Self::check_structure(token)?;
        // A signature segment that is not canonical base64url cannot match.
        URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| TokenError::BadSignature)?;

        let data = decode::<RawClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    TokenError::UnexpectedAlgorithm
                }
                _ => TokenError::MalformedToken,
            },
        )?;

        let exp = data.claims.exp.ok_or(TokenError::MalformedToken)?;
        if self.clock.now().unix_timestamp() >= exp {
            return Err(TokenError::Expired);
        }

        data.claims
            .subject()
            .map(str::to_owned)
            .ok_or(TokenError::MissingSubjectClaim)
    }
}
