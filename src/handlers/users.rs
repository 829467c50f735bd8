/// Account handlers for the authenticated user
use actix_web::{web, HttpResponse};

use crate::db::user_repo;
use crate::error::Result;
use crate::handlers::auth::removal_cookie;
use crate::middleware::AuthenticatedUser;
use crate::models::UserResponse;
use crate::AppState;

/// Current user endpoint handler
pub async fn get_me(user: AuthenticatedUser) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(UserResponse::from(user.0)))
}

/// Account deletion endpoint handler. Notes and sessions go with the row,
/// so every outstanding refresh token dies here too.
pub async fn delete_me(state: web::Data<AppState>, user: AuthenticatedUser) -> Result<HttpResponse> {
    user_repo::delete(&state.db, user.0.id).await?;

    tracing::info!("Account deleted: {}", user.0.email);

    Ok(HttpResponse::NoContent().cookie(removal_cookie()).finish())
}
