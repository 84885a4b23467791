//! Login: credential check followed by token issuance.

use std::sync::Arc;

use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use tracing::info;

use crate::auth::{CredentialStore, TokenIssuer};
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    /// RFC 3339, UTC
    pub expires_at: String,
}

#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    issuer: Arc<dyn TokenIssuer>,
}

impl AuthService {
    pub fn new(credentials: Arc<dyn CredentialStore>, issuer: Arc<dyn TokenIssuer>) -> Self {
        Self {
            credentials,
            issuer,
        }
    }

    /// Unknown email and wrong password both yield `InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AppError> {
        let subject = self
            .credentials
            .verify_credentials(email, password)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let issued = self.issuer.issue(&subject)?;
        let expires_at = issued
            .expires_at
            .format(&Rfc3339)
            .map_err(|e| AppError::internal(format!("format token expiry: {e}")))?;

        info!(user_id = %subject, "login succeeded");
        Ok(LoginResponse {
            token: issued.token,
            token_type: "Bearer",
            expires_at,
        })
    }
}
