use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notes_service::{
    config::Config,
    db::{create_pool, run_migrations},
    metrics,
    routes::configure_routes,
    security::jwt::TokenCodec,
    services::AuthService,
    AppState,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");

    tracing::info!("Starting notes-service v{}", env!("CARGO_PKG_VERSION"));

    // Initialize Prometheus metrics
    metrics::init_metrics();

    // Create database connection pool
    let db_pool = create_pool(&config.database_url, config.database_max_connections)
        .await
        .expect("Failed to create database pool");

    tracing::info!(
        "Database pool created with {} max connections",
        config.database_max_connections
    );

    // Run migrations unless explicitly skipped
    let run_migrations_env = std::env::var("RUN_MIGRATIONS").unwrap_or_else(|_| "true".into());
    if run_migrations_env != "false" {
        tracing::info!("Running database migrations...");
        run_migrations(&db_pool)
            .await
            .expect("Failed to run database migrations");
        tracing::info!("Database migrations completed");
    } else {
        tracing::info!("Skipping database migrations (RUN_MIGRATIONS=false)");
    }

    // The signing secret is loaded once here and injected everywhere
    // tokens are issued or checked
    let codec = TokenCodec::new(
        &config.jwt_secret,
        config.access_token_ttl_secs,
        config.refresh_token_ttl_secs,
    );
    let auth = AuthService::new(db_pool.clone(), codec.clone());
    let state = AppState {
        db: db_pool.clone(),
        auth,
    };

    let bind_address = config.bind_address();
    let server_config = config.clone();

    tracing::info!("Starting HTTP server at {}", bind_address);

    HttpServer::new(move || {
        // Build CORS configuration from allowed_origins
        let mut cors = Cors::default();
        let mut any_origin = false;
        for origin in server_config.cors_allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
                any_origin = true;
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);
        if !any_origin {
            // The refresh cookie only flows on credentialed requests,
            // which the wildcard origin cannot carry
            cors = cors.supports_credentials();
        }

        let codec = codec.clone();
        let db = db_pool.clone();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(move |cfg| configure_routes(cfg, codec, db))
    })
    .bind(&bind_address)?
    .workers(4)
    .run()
    .await
}
