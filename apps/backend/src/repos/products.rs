use async_trait::async_trait;
use time::OffsetDateTime;

use crate::entities::products;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Validated product fields, used for both create and full update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, draft: ProductDraft) -> Result<Product, DomainError>;

    async fn find(&self, id: i64) -> Result<Option<Product>, DomainError>;

    /// Newest first.
    async fn list(&self) -> Result<Vec<Product>, DomainError>;

    async fn update(&self, id: i64, draft: ProductDraft) -> Result<Option<Product>, DomainError>;

    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
