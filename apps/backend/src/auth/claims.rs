//! JWT payloads.

use serde::{Deserialize, Serialize};

/// Claims written into every access token we issue.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User identifier (users.id)
    pub sub: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Loosely typed view of an incoming payload. Missing or mistyped claims are
/// reported by the validator instead of failing deserialization.
#[derive(Debug, Deserialize)]
pub(crate) struct RawClaims {
    #[serde(default)]
    pub sub: Option<serde_json::Value>,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl RawClaims {
    pub(crate) fn subject(&self) -> Option<&str> {
        match &self.sub {
            Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }
}
