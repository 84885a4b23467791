// RequireIdentity through a real actix service: every rejection
// short-circuits before the handler, and the accepted subject reaches it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, HttpResponse};
use backend_test_support::assert_error_envelope;
use catalog_backend::auth::{Identity, ManualClock, TokenIssuer, TokenService};
use catalog_backend::middleware::RequireIdentity;
use catalog_backend::state::{AppState, SecurityConfig, StateBuilder};

use crate::support::{create_test_app, test_security};

async fn whoami(identity: Identity, hits: web::Data<AtomicUsize>) -> HttpResponse {
    hits.fetch_add(1, Ordering::SeqCst);
    HttpResponse::Ok().body(identity.subject)
}

struct Harness {
    state: AppState,
    clock: Arc<ManualClock>,
    hits: Arc<AtomicUsize>,
}

fn harness() -> Harness {
    let clock = Arc::new(ManualClock::at_unix(1_700_000_000));
    let state = StateBuilder::new(test_security())
        .with_clock(clock.clone())
        .build();
    Harness {
        state,
        clock,
        hits: Arc::new(AtomicUsize::new(0)),
    }
}

macro_rules! protected_app {
    ($h:expr) => {{
        let hits = $h.hits.clone();
        create_test_app($h.state.clone())
            .with_routes(move |cfg| {
                cfg.app_data(web::Data::from(hits.clone())).service(
                    web::scope("/protected")
                        .wrap(RequireIdentity)
                        .route("/whoami", web::get().to(whoami)),
                );
            })
            .build()
            .await
    }};
}

#[actix_web::test]
async fn valid_token_reaches_handler_with_subject() {
    let h = harness();
    let app = protected_app!(h);
    let token = h.state.token_issuer.issue("user-42").unwrap().token;

    for scheme in ["Bearer", "bearer", "BEARER"] {
        let req = test::TestRequest::get()
            .uri("/protected/whoami")
            .insert_header((header::AUTHORIZATION, format!("{scheme} {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "scheme {scheme}");
        assert_eq!(test::read_body(resp).await, "user-42");
    }
    assert_eq!(h.hits.load(Ordering::SeqCst), 3);
}

#[actix_web::test]
async fn header_problems_short_circuit() {
    let h = harness();
    let app = protected_app!(h);
    let token = h.state.token_issuer.issue("user-42").unwrap().token;

    let cases: Vec<(Option<String>, &str)> = vec![
        (None, "AUTH_REQUIRED"),
        (Some(String::new()), "AUTH_REQUIRED"),
        (Some("   ".to_string()), "AUTH_REQUIRED"),
        (Some(token.clone()), "INVALID_AUTH_FORMAT"),
        (Some(format!("Basic {token}")), "INVALID_AUTH_FORMAT"),
        (Some("Bearer".to_string()), "INVALID_AUTH_FORMAT"),
        (Some(format!("Bearer {token} extra")), "INVALID_AUTH_FORMAT"),
        (Some("Bearer not-a-token".to_string()), "MALFORMED_TOKEN"),
    ];

    for (value, code) in cases {
        let mut req = test::TestRequest::get().uri("/protected/whoami");
        if let Some(value) = &value {
            req = req.insert_header((header::AUTHORIZATION, value.as_str()));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(
            resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer",
            "{value:?}"
        );
        assert_error_envelope(resp, StatusCode::UNAUTHORIZED, code).await;
    }
    assert_eq!(h.hits.load(Ordering::SeqCst), 0, "handler must never run");
}

#[actix_web::test]
async fn expired_token_is_rejected_at_exact_expiry() {
    let h = harness();
    let app = protected_app!(h);
    let issued = h.state.token_issuer.issue("user-42").unwrap();

    h.clock.advance(Duration::from_secs(24 * 3600 - 1));
    let req = test::TestRequest::get()
        .uri("/protected/whoami")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", issued.token)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    h.clock.advance(Duration::from_secs(1));
    let req = test::TestRequest::get()
        .uri("/protected/whoami")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", issued.token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body = assert_error_envelope(resp, StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED").await;
    assert_eq!(body["error"]["detail"], "Invalid or expired token");
    assert_eq!(h.hits.load(Ordering::SeqCst), 1);
}

#[actix_web::test]
async fn foreign_signature_is_bad_signature_without_leaking_token() {
    let h = harness();
    let app = protected_app!(h);
    let other = SecurityConfig::new("some-other-secret-for-another-service").unwrap();
    let forged = TokenService::new(&other).issue("user-42").unwrap().token;

    let req = test::TestRequest::get()
        .uri("/protected/whoami")
        .insert_header((header::AUTHORIZATION, format!("Bearer {forged}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body = assert_error_envelope(resp, StatusCode::UNAUTHORIZED, "BAD_SIGNATURE").await;

    let signature = forged.rsplit('.').next().unwrap();
    assert!(!body.to_string().contains(signature));
    assert_eq!(h.hits.load(Ordering::SeqCst), 0);
}
