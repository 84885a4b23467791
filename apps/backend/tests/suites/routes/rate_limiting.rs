// The production router rate limits /api/v1 per client IP.

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::http::{header, StatusCode};
use actix_web::test;
use backend_test_support::assert_error_envelope;
use catalog_backend::auth::PasswordHasher;
use catalog_backend::middleware::RateLimitConfig;
use catalog_backend::state::StateBuilder;
use serde_json::json;

use crate::support::{create_test_app, test_security};

fn peer(ip: &str) -> SocketAddr {
    format!("{ip}:40000").parse().unwrap()
}

fn login_from(ip: &str) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/api/v1/login")
        .peer_addr(peer(ip))
        .set_json(json!({"email": "nobody@example.com", "password": "secret1"}))
        .to_request()
}

#[actix_web::test]
async fn burst_then_429_per_client() {
    let state = StateBuilder::new(test_security())
        .with_password_hasher(PasswordHasher::for_tests())
        .with_rate_limit(RateLimitConfig {
            burst: 2,
            refill_every: Duration::from_secs(60),
            ..RateLimitConfig::default()
        })
        .build();
    let limiter = state.rate_limiter.clone();
    let app = create_test_app(state).with_prod_routes().build().await;

    for _ in 0..2 {
        let resp = test::call_service(&app, login_from("10.0.0.1")).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "within the burst");
    }

    let resp = test::call_service(&app, login_from("10.0.0.1")).await;
    let retry_after: u64 = resp
        .headers()
        .get(header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .expect("Retry-After header");
    assert!((1..=60).contains(&retry_after));
    assert_error_envelope(resp, StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED").await;

    // A different client still has its full burst.
    let resp = test::call_service(&app, login_from("10.0.0.2")).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(limiter.tracked_clients(), 2);
}

#[actix_web::test]
async fn health_is_not_rate_limited() {
    let state = StateBuilder::new(test_security())
        .with_rate_limit(RateLimitConfig {
            burst: 1,
            ..RateLimitConfig::default()
        })
        .build();
    let app = create_test_app(state).with_prod_routes().build().await;

    for _ in 0..5 {
        let req = test::TestRequest::get()
            .uri("/health")
            .peer_addr(peer("10.0.0.9"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }
}
