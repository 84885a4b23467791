use async_trait::async_trait;
use time::OffsetDateTime;

use crate::entities::users;
use crate::errors::domain::DomainError;

/// User domain model. `password_hash` is an Argon2id PHC string and never
/// leaves the service layer.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Fields supplied when registering. Email is already normalized.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `ConflictKind::UniqueEmail` when the email is taken.
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// `Ok(None)` when no user has this id.
    async fn update_profile(
        &self,
        id: &str,
        email: &str,
        name: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Returns whether a row was updated.
    async fn update_password_hash(&self, id: &str, password_hash: &str)
        -> Result<bool, DomainError>;

    /// Returns whether a row was deleted.
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            name: model.name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
