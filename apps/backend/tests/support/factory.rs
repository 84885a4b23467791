use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, Error};
use catalog_backend::auth::PasswordHasher;
use backend_test_support::TEST_JWT_SECRET;
use catalog_backend::state::{AppState, SecurityConfig, StateBuilder};
use serde_json::{json, Value};

/// Security settings signed with the shared test secret and the default TTL.
pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_JWT_SECRET).unwrap()
}

/// In-memory state with a cheap password hasher.
pub fn test_state() -> AppState {
    StateBuilder::new(test_security())
        .with_password_hasher(PasswordHasher::for_tests())
        .build()
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

/// Register `email` with password `secret1` and log in. Returns
/// `(token, user_id)`.
pub async fn register_and_login<S>(app: &S, email: &str) -> (String, String)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/register")
        .set_json(json!({"email": email, "password": "secret1", "name": "Test User"}))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 201, "registration should succeed");
    let body: Value = test::read_body_json(resp).await;
    let user_id = body["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({"email": email, "password": "secret1"}))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 200, "login should succeed");
    let body: Value = test::read_body_json(resp).await;
    let token = body["data"]["token"].as_str().unwrap().to_string();

    (token, user_id)
}
