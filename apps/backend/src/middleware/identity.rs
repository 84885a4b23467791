//! Bearer-token gate for protected scopes.
//!
//! Reads the `Authorization` header, validates the token with the
//! application's [`TokenValidator`](crate::auth::TokenValidator) and inserts
//! the resulting [`Identity`](crate::auth::Identity) into request extensions.
//! Rejected requests are answered here; the wrapped handler never runs.

use std::future::{ready, Ready};

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::auth::authenticate;
use crate::error::AppError;
use crate::state::app_state::AppState;

pub struct RequireIdentity;

impl<S, B> Transform<S, ServiceRequest> for RequireIdentity
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireIdentityMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireIdentityMiddleware { service }))
    }
}

pub struct RequireIdentityMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequireIdentityMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let outcome = match req.app_data::<web::Data<AppState>>() {
            Some(state) => authenticate(
                req.headers().get(header::AUTHORIZATION),
                state.token_validator.as_ref(),
            )
            .map_err(AppError::from),
            None => Err(AppError::internal("AppState not registered")),
        };

        match outcome {
            Ok(identity) => {
                debug!(subject = %identity.subject, "request authenticated");
                req.extensions_mut().insert(identity);
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            // The response is built inside the future so the request's
            // trace id is in scope.
            Err(err) => Box::pin(async move {
                Ok(req.into_response(err.error_response()).map_into_right_body())
            }),
        }
    }
}
