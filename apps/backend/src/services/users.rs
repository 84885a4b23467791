//! Account lifecycle: registration, profile, password changes and the
//! credential check used by login.

use std::sync::Arc;

use async_trait::async_trait;
use lazy_regex::regex_is_match;
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::password::PasswordHasher;
use crate::auth::CredentialStore;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::logging::security;
use crate::repos::users::{NewUser, User, UserRepository};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Trimmed, lower-cased email, or `INVALID_EMAIL`.
pub fn normalize_email(raw: &str) -> Result<String, AppError> {
    let email = raw.trim().to_lowercase();
    if !regex_is_match!(r"^[^@\s]+@[^@\s]+\.[^@\s]+$", &email) {
        return Err(AppError::invalid(
            ErrorCode::InvalidEmail,
            "Email address is not valid",
        ));
    }
    Ok(email)
}

fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::invalid(
            ErrorCode::InvalidPassword,
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    Ok(())
}

fn validate_name(raw: &str) -> Result<String, AppError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::invalid(ErrorCode::InvalidName, "Name is required"));
    }
    Ok(name.to_string())
}

fn user_not_found() -> AppError {
    AppError::not_found(ErrorCode::UserNotFound, "User not found")
}

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, hasher: PasswordHasher) -> Self {
        Self { repo, hasher }
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<User, AppError> {
        let email = normalize_email(email)?;
        validate_password(password)?;
        let name = validate_name(name)?;

        let password_hash = self.hasher.hash_blocking(password.to_string()).await?;
        let user = self
            .repo
            .create(NewUser {
                id: Uuid::new_v4().to_string(),
                email,
                password_hash,
                name,
            })
            .await?;

        info!(user_id = %user.id, email = %Redacted(&user.email), "user registered");
        Ok(user)
    }

    pub async fn profile(&self, subject: &str) -> Result<User, AppError> {
        self.repo
            .find_by_id(subject)
            .await?
            .ok_or_else(user_not_found)
    }

    pub async fn update_profile(
        &self,
        subject: &str,
        email: &str,
        name: &str,
    ) -> Result<User, AppError> {
        let email = normalize_email(email)?;
        let name = validate_name(name)?;

        let user = self
            .repo
            .update_profile(subject, &email, &name)
            .await?
            .ok_or_else(user_not_found)?;
        debug!(user_id = %user.id, "profile updated");
        Ok(user)
    }

    pub async fn change_password(
        &self,
        subject: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        validate_password(new_password)?;

        let user = self.profile(subject).await?;
        let matches = self
            .hasher
            .verify_blocking(current_password.to_string(), user.password_hash)
            .await?;
        if !matches {
            return Err(AppError::bad_request(
                ErrorCode::InvalidCurrentPassword,
                "Current password is incorrect",
            ));
        }

        let new_hash = self.hasher.hash_blocking(new_password.to_string()).await?;
        if !self.repo.update_password_hash(subject, &new_hash).await? {
            return Err(user_not_found());
        }
        info!(user_id = %subject, "password changed");
        Ok(())
    }

    pub async fn delete_account(&self, subject: &str) -> Result<(), AppError> {
        if !self.repo.delete(subject).await? {
            return Err(user_not_found());
        }
        info!(user_id = %subject, "account deleted");
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for UserService {
    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<String>, AppError> {
        let email = email.trim().to_lowercase();
        let Some(user) = self.repo.find_by_email(&email).await? else {
            security::login_failed(&email);
            return Ok(None);
        };

        let matches = self
            .hasher
            .verify_blocking(password.to_string(), user.password_hash)
            .await?;
        if !matches {
            security::login_failed(&email);
            return Ok(None);
        }
        Ok(Some(user.id))
    }
}
