use actix_web::web;

use crate::middleware::{RateLimit, RequireIdentity};

pub mod auth;
pub mod health;
pub mod products;
pub mod users;

/// Mount every route. `/api/v1` is rate limited; the `users` and
/// `products` scopes additionally require a bearer token.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);

    cfg.service(
        web::scope("/api/v1")
            .wrap(RateLimit)
            .configure(auth::configure_routes)
            .service(
                web::scope("/users")
                    .wrap(RequireIdentity)
                    .configure(users::configure_routes),
            )
            .service(
                web::scope("/products")
                    .wrap(RequireIdentity)
                    .configure(products::configure_routes),
            ),
    );
}
