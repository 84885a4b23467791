//! JSON response envelope shared by every endpoint.
//!
//! Success: `{"success": true, "message": ..., "data": ...}`
//! Failure: `{"success": false, "message": ..., "error": {"code", "detail", "trace_id"}}`

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub detail: String,
    pub trace_id: String,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>, error: ErrorBody) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error: Some(error),
        }
    }
}

pub fn ok<T: Serialize>(message: &str, data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(message, data))
}

pub fn created<T: Serialize>(message: &str, data: T) -> HttpResponse {
    HttpResponse::build(StatusCode::CREATED).json(ApiResponse::success(message, data))
}

pub fn ok_message(message: &str) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::message_only(message))
}
