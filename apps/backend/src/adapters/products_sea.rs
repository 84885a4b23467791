//! SeaORM adapter for the product repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, NotSet, QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::entities::products;
use crate::errors::domain::DomainError;
use crate::repos::products::{Product, ProductDraft, ProductRepository};

pub async fn insert_product<C: ConnectionTrait>(
    conn: &C,
    draft: ProductDraft,
) -> Result<products::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    products::ActiveModel {
        id: NotSet,
        name: Set(draft.name),
        description: Set(draft.description),
        price: Set(draft.price),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

pub async fn replace_product<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    draft: ProductDraft,
) -> Result<Option<products::Model>, sea_orm::DbErr> {
    let Some(model) = products::Entity::find_by_id(id).one(conn).await? else {
        return Ok(None);
    };

    let mut active: products::ActiveModel = model.into();
    active.name = Set(draft.name);
    active.description = Set(draft.description);
    active.price = Set(draft.price);
    active.updated_at = Set(OffsetDateTime::now_utc());
    active.update(conn).await.map(Some)
}

#[derive(Debug, Clone)]
pub struct SeaProductRepository {
    db: DatabaseConnection,
}

impl SeaProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for SeaProductRepository {
    async fn create(&self, draft: ProductDraft) -> Result<Product, DomainError> {
        Ok(insert_product(&self.db, draft).await?.into())
    }

    async fn find(&self, id: i64) -> Result<Option<Product>, DomainError> {
        let model = products::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Product::from))
    }

    async fn list(&self) -> Result<Vec<Product>, DomainError> {
        let models = products::Entity::find()
            .order_by_desc(products::Column::CreatedAt)
            .order_by_desc(products::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn update(&self, id: i64, draft: ProductDraft) -> Result<Option<Product>, DomainError> {
        Ok(replace_product(&self.db, id, draft)
            .await?
            .map(Product::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = products::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
