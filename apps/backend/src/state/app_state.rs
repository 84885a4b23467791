use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::auth::{TokenIssuer, TokenValidator};
use crate::middleware::rate_limit::RateLimiter;
use crate::services::auth::AuthService;
use crate::services::products::ProductService;
use crate::services::users::UserService;

/// Shared, read-mostly application state. Built once by
/// [`StateBuilder`](super::builder::StateBuilder) and registered as
/// `web::Data<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// `None` when running on in-memory storage
    pub db: Option<DatabaseConnection>,
    pub security: SecurityConfig,
    pub token_issuer: Arc<dyn TokenIssuer>,
    pub token_validator: Arc<dyn TokenValidator>,
    pub auth: AuthService,
    pub users: UserService,
    pub products: ProductService,
    pub rate_limiter: RateLimiter,
}
