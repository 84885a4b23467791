use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::assert_success_envelope;
use catalog_backend::state::StateBuilder;
use db_infra::{bootstrap_db, DbSettings};

use crate::support::{create_test_app, test_security, test_state};

#[actix_web::test]
async fn health_without_database_reports_memory() {
    let app = create_test_app(test_state()).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let data = assert_success_envelope(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(data["status"], "ok");
    assert_eq!(data["db"], "memory");
    assert_eq!(data["app_version"], env!("CARGO_PKG_VERSION"));
}

#[actix_web::test]
async fn health_with_sqlite_reports_latest_migration() {
    let db = bootstrap_db(&DbSettings::sqlite_memory()).await.unwrap();
    let state = StateBuilder::new(test_security())
        .with_db(db)
        .build();
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let data = assert_success_envelope(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(data["db"], "ok");
    assert_eq!(data["migrations"], "m20240601_000002_create_products");
}
