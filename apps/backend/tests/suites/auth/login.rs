// Login over the production router.

use actix_web::http::{header, StatusCode};
use actix_web::test;
use backend_test_support::{assert_error_envelope, assert_success_envelope};
use serde_json::json;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::support::{create_test_app, register_and_login, test_state};

#[actix_web::test]
async fn login_returns_bearer_token_for_user_id() {
    let state = test_state();
    let validator = state.token_validator.clone();
    let app = create_test_app(state).with_prod_routes().build().await;

    let (token, user_id) = register_and_login(&app, "ada@example.com").await;
    assert_eq!(validator.validate(&token).unwrap(), user_id);

    let req = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({"email": "  ADA@example.com", "password": "secret1"}))
        .to_request();
    let data = assert_success_envelope(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(data["token_type"], "Bearer");

    let expires_at =
        OffsetDateTime::parse(data["expires_at"].as_str().unwrap(), &Rfc3339).unwrap();
    let ttl = expires_at - OffsetDateTime::now_utc();
    assert!(ttl > time::Duration::hours(23) && ttl <= time::Duration::hours(24));
}

#[actix_web::test]
async fn unknown_email_and_wrong_password_look_the_same() {
    let app = create_test_app(test_state()).with_prod_routes().build().await;
    register_and_login(&app, "ada@example.com").await;

    let mut details = Vec::new();
    for (email, password) in [
        ("ada@example.com", "not-the-password"),
        ("nobody@example.com", "secret1"),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"email": email, "password": password}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
        let body =
            assert_error_envelope(resp, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS").await;
        details.push(body["error"]["detail"].clone());
    }
    assert_eq!(details[0], details[1]);
}

#[actix_web::test]
async fn malformed_login_body_is_bad_request() {
    let app = create_test_app(test_state()).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({"email": "ada@example.com"}))
        .to_request();
    assert_error_envelope(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "BAD_REQUEST",
    )
    .await;
}
