//! SeaORM adapter for the user repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set,
};
use time::OffsetDateTime;

use crate::entities::users;
use crate::errors::domain::DomainError;
use crate::repos::users::{NewUser, User, UserRepository};

// Adapter functions return DbErr; the repository impl maps to DomainError via From<DbErr>.

pub async fn insert_user<C: ConnectionTrait>(
    conn: &C,
    user: NewUser,
) -> Result<users::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    users::ActiveModel {
        id: Set(user.id),
        email: Set(user.email),
        password_hash: Set(user.password_hash),
        name: Set(user.name),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

pub async fn find_by_email<C: ConnectionTrait>(
    conn: &C,
    email: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await
}

pub async fn update_profile<C: ConnectionTrait>(
    conn: &C,
    id: &str,
    email: &str,
    name: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    let Some(model) = users::Entity::find_by_id(id.to_string()).one(conn).await? else {
        return Ok(None);
    };

    let mut active: users::ActiveModel = model.into();
    active.email = Set(email.to_string());
    active.name = Set(name.to_string());
    active.updated_at = Set(OffsetDateTime::now_utc());
    active.update(conn).await.map(Some)
}

pub async fn update_password_hash<C: ConnectionTrait>(
    conn: &C,
    id: &str,
    password_hash: &str,
) -> Result<bool, sea_orm::DbErr> {
    let Some(model) = users::Entity::find_by_id(id.to_string()).one(conn).await? else {
        return Ok(false);
    };

    let mut active: users::ActiveModel = model.into();
    active.password_hash = Set(password_hash.to_string());
    active.updated_at = Set(OffsetDateTime::now_utc());
    active.update(conn).await?;
    Ok(true)
}

/// [`UserRepository`] backed by a SeaORM connection pool.
#[derive(Debug, Clone)]
pub struct SeaUserRepository {
    db: DatabaseConnection,
}

impl SeaUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        Ok(insert_user(&self.db, user).await?.into())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError> {
        let model = users::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?;
        Ok(model.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(find_by_email(&self.db, email).await?.map(User::from))
    }

    async fn update_profile(
        &self,
        id: &str,
        email: &str,
        name: &str,
    ) -> Result<Option<User>, DomainError> {
        Ok(update_profile(&self.db, id, email, name)
            .await?
            .map(User::from))
    }

    async fn update_password_hash(
        &self,
        id: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        Ok(update_password_hash(&self.db, id, password_hash).await?)
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let result = users::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
