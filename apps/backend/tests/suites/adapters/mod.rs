use catalog_backend::adapters::{SeaProductRepository, SeaUserRepository};
use db_infra::{bootstrap_db, DbSettings};
use sea_orm::DatabaseConnection;

pub mod products_sea;
pub mod users_sea;

pub async fn sqlite() -> DatabaseConnection {
    bootstrap_db(&DbSettings::sqlite_memory())
        .await
        .expect("in-memory sqlite should bootstrap")
}

pub async fn user_repo() -> SeaUserRepository {
    SeaUserRepository::new(sqlite().await)
}

pub async fn product_repo() -> SeaProductRepository {
    SeaProductRepository::new(sqlite().await)
}
