use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::auth::Identity;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::http::response::{ok, ok_message};
use crate::repos::users::User;
use crate::state::app_state::AppState;

/// Public view of a user; the password hash is never serialized.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

async fn get_profile(
    identity: Identity,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = app_state.users.profile(&identity.subject).await?;
    Ok(ok("Profile retrieved", UserView::from(user)))
}

async fn update_profile(
    identity: Identity,
    body: ValidatedJson<UpdateProfileRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = app_state
        .users
        .update_profile(&identity.subject, &body.email, &body.name)
        .await?;
    Ok(ok("Profile updated", UserView::from(user)))
}

async fn change_password(
    identity: Identity,
    body: ValidatedJson<ChangePasswordRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    app_state
        .users
        .change_password(
            &identity.subject,
            &body.current_password,
            &body.new_password,
        )
        .await?;
    Ok(ok_message("Password changed"))
}

async fn delete_account(
    identity: Identity,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    app_state.users.delete_account(&identity.subject).await?;
    Ok(ok_message("Account deleted"))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/profile")
            .route(web::get().to(get_profile))
            .route(web::put().to(update_profile))
            .route(web::delete().to(delete_account)),
    )
    .route("/change-password", web::post().to(change_password));
}
