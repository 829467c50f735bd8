//! Route configuration
//!
//! Centralized route setup extracted from main.rs
//! Each domain (auth, notes, users) manages its own routes

use crate::handlers;
use crate::middleware::JwtAuthMiddleware;
use crate::security::jwt::TokenCodec;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

/// Configure all routes for the application. The codec and pool are handed
/// to the session middleware guarding the protected scopes.
pub fn configure_routes(cfg: &mut web::ServiceConfig, codec: TokenCodec, db: PgPool) {
    let notes_codec = codec.clone();
    let notes_db = db.clone();

    cfg
        // Operational endpoints
        .route("/metrics", web::get().to(metrics_handler))
        .route("/health", web::get().to(handlers::health_check))
        .route("/health/ready", web::get().to(handlers::readiness_check))
        .route("/health/live", web::get().to(handlers::liveness_check))
        // API routes
        .service(
            web::scope("/api/v1")
                .configure(routes::auth::configure)
                .configure(move |cfg| routes::notes::configure(cfg, notes_codec, notes_db))
                .configure(move |cfg| routes::users::configure(cfg, codec, db)),
        );
}

/// Metrics handler
async fn metrics_handler() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(crate::metrics::gather_metrics())
}

// Sub-modules for each domain
mod routes {
    use super::*;

    pub mod auth {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/auth")
                    .route("/register", web::post().to(handlers::register))
                    .route("/login", web::post().to(handlers::login))
                    .route("/refresh", web::post().to(handlers::refresh))
                    .route("/logout", web::post().to(handlers::logout)),
            );
        }
    }

    pub mod notes {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig, codec: TokenCodec, db: PgPool) {
            cfg.service(
                web::scope("/notes")
                    .wrap(JwtAuthMiddleware::new(codec, db))
                    .route("", web::post().to(handlers::create_note))
                    .route("", web::get().to(handlers::list_notes))
                    .route("/{id}", web::get().to(handlers::get_note))
                    .route("/{id}", web::put().to(handlers::update_note))
                    .route("/{id}", web::delete().to(handlers::delete_note)),
            );
        }
    }

    pub mod users {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig, codec: TokenCodec, db: PgPool) {
            cfg.service(
                web::scope("/users/me")
                    .wrap(JwtAuthMiddleware::new(codec, db))
                    .route("", web::get().to(handlers::get_me))
                    .route("", web::delete().to(handlers::delete_me)),
            );
        }
    }
}
