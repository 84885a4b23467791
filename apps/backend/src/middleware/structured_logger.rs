//! Access log: one `request_completed` event per request.
//!
//! Besides method, route and status, each event carries the client address
//! the rate limiter keys on, the authenticated subject when
//! [`RequireIdentity`](super::identity::RequireIdentity) accepted a token,
//! and an [`Outcome`] so rejected and throttled traffic can be filtered
//! without parsing status codes.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use super::request_trace::TraceId;
use crate::auth::Identity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Unauthenticated,
    RateLimited,
    Rejected,
    Failed,
}

impl Outcome {
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthenticated,
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited,
            s if s.is_server_error() => Self::Failed,
            s if s.is_client_error() => Self::Rejected,
            _ => Self::Ok,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Unauthenticated => "unauthenticated",
            Self::RateLimited => "rate_limited",
            Self::Rejected => "rejected",
            Self::Failed => "failed",
        }
    }
}

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().clone();
        let client = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("unknown")
            .to_string();
        let trace_id = req
            .extensions()
            .get::<TraceId>()
            .map(|t| t.0.clone())
            .unwrap_or_else(|| "unknown".to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            // Route pattern keeps product ids out of the log; the identity is
            // only present once the inner middleware has run.
            let (status, route, subject) = match &result {
                Ok(res) => {
                    let req = res.request();
                    let route = req
                        .match_pattern()
                        .unwrap_or_else(|| req.path().to_string());
                    let subject = req.extensions().get::<Identity>().map(|i| i.subject.clone());
                    (res.status(), route, subject)
                }
                Err(err) => (err.as_response_error().status_code(), String::new(), None),
            };
            let outcome = Outcome::from_status(status);
            let subject = subject.as_deref().unwrap_or("-");
            let duration_us = start.elapsed().as_micros() as u64;

            macro_rules! completed {
                ($level:ident) => {
                    $level!(
                        http.method = %method,
                        http.route = %route,
                        http.status_code = status.as_u16(),
                        outcome = outcome.as_str(),
                        client.address = %client,
                        user.id = %subject,
                        duration_us,
                        trace_id = %trace_id,
                        "request_completed"
                    )
                };
            }

            match outcome {
                Outcome::Failed => completed!(error),
                Outcome::Ok => completed!(info),
                Outcome::Unauthenticated | Outcome::RateLimited | Outcome::Rejected => {
                    completed!(warn)
                }
            }

            result
        })
    }
}
