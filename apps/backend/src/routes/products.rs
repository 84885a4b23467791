use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::AppError;
use crate::extractors::{ProductId, ValidatedJson};
use crate::http::response::{created, ok, ok_message};
use crate::repos::products::Product;
use crate::services::products::validate_draft;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct ProductView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Product> for ProductView {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Body for both create and full update.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
}

async fn create_product(
    body: ValidatedJson<ProductRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let draft = validate_draft(&body.name, &body.description, body.price)?;
    let product = app_state.products.create(draft).await?;
    Ok(created("Product created", ProductView::from(product)))
}

async fn list_products(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let products: Vec<ProductView> = app_state
        .products
        .list()
        .await?
        .into_iter()
        .map(ProductView::from)
        .collect();
    Ok(ok("Products retrieved", products))
}

async fn get_product(
    id: ProductId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let product = app_state.products.get(id.0).await?;
    Ok(ok("Product retrieved", ProductView::from(product)))
}

async fn update_product(
    id: ProductId,
    body: ValidatedJson<ProductRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let draft = validate_draft(&body.name, &body.description, body.price)?;
    let product = app_state.products.update(id.0, draft).await?;
    Ok(ok("Product updated", ProductView::from(product)))
}

async fn delete_product(
    id: ProductId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    app_state.products.delete(id.0).await?;
    Ok(ok_message("Product deleted"))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(create_product))
            .route(web::get().to(list_products)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_product))
            .route(web::put().to(update_product))
            .route(web::delete().to(delete_product)),
    );
}
