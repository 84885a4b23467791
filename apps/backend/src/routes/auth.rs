use actix_web::{web, HttpResponse};
use serde::Deserialize;

use super::users::UserView;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::http::response::{created, ok};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

async fn register(
    body: ValidatedJson<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let RegisterRequest {
        email,
        password,
        name,
    } = body.into_inner();
    let user = app_state.users.register(&email, &password, &name).await?;
    Ok(created("User registered", UserView::from(user)))
}

async fn login(
    body: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let response = app_state.auth.login(&body.email, &body.password).await?;
    Ok(ok("Login successful", response))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login));
}
