use std::sync::Arc;

use tracing::info;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::products::{Product, ProductDraft, ProductRepository};

/// Trim and check product fields. Price must be finite and positive.
pub fn validate_draft(name: &str, description: &str, price: f64) -> Result<ProductDraft, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::invalid(
            ErrorCode::InvalidName,
            "Product name is required",
        ));
    }
    if !price.is_finite() || price <= 0.0 {
        return Err(AppError::invalid(
            ErrorCode::InvalidPrice,
            "Price must be a positive number",
        ));
    }
    Ok(ProductDraft {
        name: name.to_string(),
        description: description.trim().to_string(),
        price,
    })
}

fn product_not_found(id: i64) -> AppError {
    AppError::not_found(ErrorCode::ProductNotFound, format!("Product {id} not found"))
}

#[derive(Clone)]
pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, draft: ProductDraft) -> Result<Product, AppError> {
        let product = self.repo.create(draft).await?;
        info!(product_id = product.id, "product created");
        Ok(product)
    }

    pub async fn get(&self, id: i64) -> Result<Product, AppError> {
        self.repo
            .find(id)
            .await?
            .ok_or_else(|| product_not_found(id))
    }

    pub async fn list(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.repo.list().await?)
    }

    pub async fn update(&self, id: i64, draft: ProductDraft) -> Result<Product, AppError> {
        self.repo
            .update(id, draft)
            .await?
            .ok_or_else(|| product_not_found(id))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(product_not_found(id));
        }
        info!(product_id = id, "product deleted");
        Ok(())
    }
}
