/// Authentication handlers
use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    web, HttpRequest, HttpResponse,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::UserResponse;
use crate::validators;
use crate::AppState;

pub const REFRESH_COOKIE: &str = "refresh_token";

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    // Length cap matches the users.email column
    #[validate(email, length(max = 255))]
    pub email: String,

    #[validate(length(min = 8))]
    pub password: String,

    /// Optional display name, stored empty when omitted
    #[validate(length(max = 100))]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Access token response for login and refresh
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Refresh tokens travel only in this cookie, never in response bodies.
/// SameSite=Strict keeps cross-site requests from carrying it.
fn refresh_cookie(token: String, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build(REFRESH_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .max_age(CookieDuration::seconds(max_age_secs))
        .finish()
}

pub(crate) fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(REFRESH_COOKIE, "")
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .finish();
    cookie.make_removal();
    cookie
}

/// Register endpoint handler
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    payload.validate()?;

    let name = payload.name.as_deref().unwrap_or("");
    if !name.is_empty() && !validators::validate_name(name) {
        return Err(AppError::Validation(
            "name contains unsupported characters".to_string(),
        ));
    }
    if !validators::validate_password(&payload.password) {
        return Err(AppError::Validation(
            "password must contain at least one letter and one digit".to_string(),
        ));
    }

    let user = state
        .auth
        .register(name, &payload.email, &payload.password)
        .await?;

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Login endpoint handler
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    payload.validate()?;

    let tokens = state.auth.login(&payload.email, &payload.password).await?;

    let cookie = refresh_cookie(tokens.refresh_token, tokens.refresh_expires_in);
    Ok(HttpResponse::Ok().cookie(cookie).json(TokenResponse {
        access_token: tokens.access_token,
        token_type: "Bearer".to_string(),
        expires_in: tokens.expires_in,
    }))
}

/// Refresh endpoint handler. Reads the refresh cookie and returns a new
/// access token; the cookie itself is left as it is.
pub async fn refresh(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    let cookie = req.cookie(REFRESH_COOKIE).ok_or(AppError::MissingToken)?;

    let grant = state.auth.refresh(cookie.value()).await?;

    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token: grant.access_token,
        token_type: "Bearer".to_string(),
        expires_in: grant.expires_in,
    }))
}

/// Logout endpoint handler. Revokes the session behind the cookie and
/// clears it. Succeeds even when no cookie is present.
pub async fn logout(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    if let Some(cookie) = req.cookie(REFRESH_COOKIE) {
        state.auth.logout(cookie.value()).await?;
    }

    Ok(HttpResponse::Ok()
        .cookie(removal_cookie())
        .json(serde_json::json!({
            "message": "Logged out successfully"
        })))
}
