use std::fmt;
use std::time::Duration;

use jsonwebtoken::Algorithm;
use tracing::warn;

use crate::auth::DEFAULT_TOKEN_TTL;
use crate::config::ConfigError;

/// Secrets shorter than this are accepted but logged.
const RECOMMENDED_SECRET_LEN: usize = 32;

/// JWT signing settings. Immutable after startup.
#[derive(Clone)]
pub struct SecurityConfig {
    jwt_secret: Vec<u8>,
    /// Algorithm used when issuing (HS256)
    pub algorithm: Algorithm,
    pub token_ttl: Duration,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        if jwt_secret.len() < RECOMMENDED_SECRET_LEN {
            warn!(
                secret_len = jwt_secret.len(),
                recommended = RECOMMENDED_SECRET_LEN,
                "JWT secret is shorter than recommended"
            );
        }

        Ok(Self {
            jwt_secret,
            algorithm: Algorithm::HS256,
            token_ttl: DEFAULT_TOKEN_TTL,
        })
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn jwt_secret(&self) -> &[u8] {
        &self.jwt_secret
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}
