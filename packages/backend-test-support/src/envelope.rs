//! Response envelope assertions for backend tests
//!
//! These helpers only know the wire contract (`success`, `message`, `data`,
//! `error.code`, `error.trace_id`, `x-trace-id`), not the backend's types.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct ErrorBodyLike {
    code: String,
    detail: String,
    trace_id: String,
}

#[derive(Debug, Deserialize)]
struct EnvelopeLike {
    success: bool,
    message: String,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<ErrorBodyLike>,
}

/// Assert an error response and return its parsed JSON body.
///
/// Checks status, `success == false`, the error code, and that the body
/// `trace_id` matches the `x-trace-id` header.
pub async fn assert_error_envelope(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_code: &str,
) -> Value {
    assert_eq!(resp.status(), expected_status);

    let trace_header = resp
        .headers()
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .expect("x-trace-id header should be present");

    let body = actix_web::test::read_body(resp).await;
    let json: Value = serde_json::from_slice(&body).expect("body should be JSON");
    let envelope: EnvelopeLike =
        serde_json::from_value(json.clone()).expect("body should be an envelope");

    assert!(!envelope.success, "error envelope must have success=false");
    assert!(!envelope.message.is_empty());
    assert!(envelope.data.is_none(), "error envelope must not carry data");

    let error = envelope.error.expect("error envelope must carry error");
    assert_eq!(error.code, expected_code, "detail was: {}", error.detail);
    assert_eq!(
        error.trace_id, trace_header,
        "trace_id in body should match x-trace-id header"
    );

    json
}

/// Assert a success response and return its `data` field (or `Null`).
pub async fn assert_success_envelope(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
) -> Value {
    let status = resp.status();
    let body = actix_web::test::read_body(resp).await;
    assert_eq!(
        status,
        expected_status,
        "unexpected status, body: {}",
        String::from_utf8_lossy(&body)
    );

    let envelope: EnvelopeLike = serde_json::from_slice(&body).expect("body should be an envelope");
    assert!(envelope.success, "success envelope must have success=true");
    assert!(envelope.error.is_none());

    envelope.data.unwrap_or(Value::Null)
}
