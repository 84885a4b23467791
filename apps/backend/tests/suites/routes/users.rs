use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::{assert_error_envelope, assert_success_envelope};
use serde_json::json;

use crate::support::{bearer, create_test_app, register_and_login, test_state};

#[actix_web::test]
async fn register_returns_user_without_password_hash() {
    let app = create_test_app(test_state()).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/register")
        .set_json(json!({"email": " Ada@Example.com ", "password": "secret1", "name": "Ada"}))
        .to_request();
    let data =
        assert_success_envelope(test::call_service(&app, req).await, StatusCode::CREATED).await;

    assert_eq!(data["email"], "ada@example.com");
    assert_eq!(data["name"], "Ada");
    assert!(data["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(data.get("password_hash").is_none());
    assert!(data.get("password").is_none());
}

#[actix_web::test]
async fn register_rejects_bad_input_and_duplicates() {
    let app = create_test_app(test_state()).with_prod_routes().build().await;
    register_and_login(&app, "ada@example.com").await;

    let cases = [
        (
            json!({"email": "nope", "password": "secret1", "name": "A"}),
            StatusCode::BAD_REQUEST,
            "INVALID_EMAIL",
        ),
        (
            json!({"email": "b@example.com", "password": "123", "name": "B"}),
            StatusCode::BAD_REQUEST,
            "INVALID_PASSWORD",
        ),
        (
            json!({"email": "b@example.com", "password": "secret1", "name": ""}),
            StatusCode::BAD_REQUEST,
            "INVALID_NAME",
        ),
        (
            json!({"email": "ADA@example.com", "password": "secret1", "name": "Dup"}),
            StatusCode::CONFLICT,
            "EMAIL_TAKEN",
        ),
    ];

    for (body, status, code) in cases {
        let req = test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(body)
            .to_request();
        assert_error_envelope(test::call_service(&app, req).await, status, code).await;
    }
}

#[actix_web::test]
async fn profile_read_and_update() {
    let app = create_test_app(test_state()).with_prod_routes().build().await;
    let (token, user_id) = register_and_login(&app, "ada@example.com").await;
    register_and_login(&app, "bob@example.com").await;

    let req = test::TestRequest::get()
        .uri("/api/v1/users/profile")
        .insert_header(bearer(&token))
        .to_request();
    let data = assert_success_envelope(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(data["id"], user_id.as_str());

    let req = test::TestRequest::put()
        .uri("/api/v1/users/profile")
        .insert_header(bearer(&token))
        .set_json(json!({"email": "bob@example.com", "name": "Ada"}))
        .to_request();
    assert_error_envelope(
        test::call_service(&app, req).await,
        StatusCode::CONFLICT,
        "EMAIL_TAKEN",
    )
    .await;

    let req = test::TestRequest::put()
        .uri("/api/v1/users/profile")
        .insert_header(bearer(&token))
        .set_json(json!({"email": "ada.l@example.com", "name": "Ada Lovelace"}))
        .to_request();
    let data = assert_success_envelope(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(data["email"], "ada.l@example.com");
    assert_eq!(data["name"], "Ada Lovelace");
}

#[actix_web::test]
async fn change_password_then_login_with_new_one() {
    let app = create_test_app(test_state()).with_prod_routes().build().await;
    let (token, _) = register_and_login(&app, "ada@example.com").await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users/change-password")
        .insert_header(bearer(&token))
        .set_json(json!({"current_password": "wrong-one", "new_password": "secret2"}))
        .to_request();
    assert_error_envelope(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "INVALID_CURRENT_PASSWORD",
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users/change-password")
        .insert_header(bearer(&token))
        .set_json(json!({"current_password": "secret1", "new_password": "secret2"}))
        .to_request();
    assert_success_envelope(test::call_service(&app, req).await, StatusCode::OK).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({"email": "ada@example.com", "password": "secret2"}))
        .to_request();
    assert_success_envelope(test::call_service(&app, req).await, StatusCode::OK).await;
}

#[actix_web::test]
async fn token_outlives_deleted_account() {
    let app = create_test_app(test_state()).with_prod_routes().build().await;
    let (token, _) = register_and_login(&app, "ada@example.com").await;

    let req = test::TestRequest::delete()
        .uri("/api/v1/users/profile")
        .insert_header(bearer(&token))
        .to_request();
    assert_success_envelope(test::call_service(&app, req).await, StatusCode::OK).await;

    // The token still verifies; the user behind it is gone.
    let req = test::TestRequest::get()
        .uri("/api/v1/users/profile")
        .insert_header(bearer(&token))
        .to_request();
    assert_error_envelope(
        test::call_service(&app, req).await,
        StatusCode::NOT_FOUND,
        "USER_NOT_FOUND",
    )
    .await;
}

#[actix_web::test]
async fn user_routes_require_identity() {
    let app = create_test_app(test_state()).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/v1/users/profile")
        .to_request();
    assert_error_envelope(
        test::call_service(&app, req).await,
        StatusCode::UNAUTHORIZED,
        "AUTH_REQUIRED",
    )
    .await;
}
