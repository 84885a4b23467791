use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::app_state::AppState;
use super::security_config::SecurityConfig;
use crate::adapters::{
    MemoryProductRepository, MemoryUserRepository, SeaProductRepository, SeaUserRepository,
};
use crate::auth::{Clock, PasswordHasher, SystemClock, TokenService};
use crate::middleware::rate_limit::{RateLimitConfig, RateLimiter};
use crate::repos::{ProductRepository, UserRepository};
use crate::services::auth::AuthService;
use crate::services::products::ProductService;
use crate::services::users::UserService;

/// Wires repositories, services and the token service into an [`AppState`].
///
/// Without a database the in-memory repositories are used.
pub struct StateBuilder {
    security: SecurityConfig,
    db: Option<DatabaseConnection>,
    clock: Arc<dyn Clock>,
    hasher: PasswordHasher,
    rate_limit: RateLimitConfig,
}

impl StateBuilder {
    pub fn new(security: SecurityConfig) -> Self {
        Self {
            security,
            db: None,
            clock: Arc::new(SystemClock),
            hasher: PasswordHasher::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }

    pub fn with_db(mut self, db: DatabaseConnection) -> Self {
        self.db = Some(db);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_password_hasher(mut self, hasher: PasswordHasher) -> Self {
        self.hasher = hasher;
        self
    }

    pub fn with_rate_limit(mut self, config: RateLimitConfig) -> Self {
        self.rate_limit = config;
        self
    }

    pub fn build(self) -> AppState {
        let (user_repo, product_repo): (Arc<dyn UserRepository>, Arc<dyn ProductRepository>) =
            match &self.db {
                Some(db) => (
                    Arc::new(SeaUserRepository::new(db.clone())),
                    Arc::new(SeaProductRepository::new(db.clone())),
                ),
                None => (
                    Arc::new(MemoryUserRepository::new()),
                    Arc::new(MemoryProductRepository::new()),
                ),
            };

        let tokens = Arc::new(TokenService::with_clock(&self.security, self.clock));
        let users = UserService::new(user_repo, self.hasher);

        AppState {
            db: self.db,
            security: self.security,
            token_issuer: tokens.clone(),
            token_validator: tokens.clone(),
            auth: AuthService::new(Arc::new(users.clone()), tokens),
            users,
            products: ProductService::new(product_repo),
            rate_limiter: RateLimiter::new(self.rate_limit),
        }
    }
}
