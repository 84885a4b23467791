// Every error leaves the service in the same envelope, with the request's
// trace id in both the header and the body.

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::assert_error_envelope;
use catalog_backend::middleware::request_trace::TRACE_ID_HEADER;

use crate::support::{create_test_app, test_state};

#[actix_web::test]
async fn error_trace_id_matches_header_and_is_unique() {
    let app = create_test_app(test_state()).with_prod_routes().build().await;

    let mut seen = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::get()
            .uri("/api/v1/users/profile")
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body = assert_error_envelope(resp, StatusCode::UNAUTHORIZED, "AUTH_REQUIRED").await;
        assert_eq!(body["message"], "Unauthorized");
        seen.push(body["error"]["trace_id"].as_str().unwrap().to_string());
    }
    assert_ne!(seen[0], seen[1]);
    assert_ne!(seen[0], "unknown");
}

#[actix_web::test]
async fn success_responses_carry_trace_header() {
    let app = create_test_app(test_state()).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key(TRACE_ID_HEADER));
}

#[actix_web::test]
async fn oversized_body_is_rejected_cleanly() {
    let app = create_test_app(test_state()).with_prod_routes().build().await;

    let huge = format!(
        r#"{{"email":"a@b.co","password":"{}","name":"x"}}"#,
        "p".repeat(70 * 1024)
    );
    let req = test::TestRequest::post()
        .uri("/api/v1/register")
        .insert_header(("content-type", "application/json"))
        .set_payload(huge)
        .to_request();
    let body = assert_error_envelope(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "BAD_REQUEST",
    )
    .await;
    assert_eq!(body["error"]["detail"], "Request body too large");
}
