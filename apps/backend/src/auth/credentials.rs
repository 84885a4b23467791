use async_trait::async_trait;

use crate::error::AppError;

/// Password verification capability consumed by the login flow.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns the subject (user id) when `email`/`password` match a stored
    /// user, `None` otherwise. Unknown email and wrong password are not
    /// distinguished.
    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<String>, AppError>;
}
