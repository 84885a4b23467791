use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Positive product id taken from the `{id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductId(pub i64);

impl ProductId {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(AppError::bad_request(
                ErrorCode::InvalidProductId,
                format!("Invalid product id: {raw}"),
            )),
        }
    }
}

impl FromRequest for ProductId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(match req.match_info().get("id") {
            Some(raw) => Self::parse(raw),
            None => Err(AppError::bad_request(
                ErrorCode::InvalidProductId,
                "Missing product id",
            )),
        })
    }
}
