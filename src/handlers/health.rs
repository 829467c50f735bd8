use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;

use crate::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    database: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "lowercase")]
enum ComponentStatus {
    Healthy,
    Unhealthy,
}

#[derive(Serialize)]
struct ComponentCheck {
    status: ComponentStatus,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
}

#[derive(Serialize)]
struct ReadinessResponse {
    ready: bool,
    status: ComponentStatus,
    checks: HashMap<String, ComponentCheck>,
    timestamp: String,
}

/// Basic health check, only probes the database connection
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_status = match sqlx::query("SELECT 1").fetch_one(&state.db).await {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };

    HttpResponse::Ok().json(HealthResponse {
        status: if db_status == "healthy" {
            "ok"
        } else {
            "degraded"
        }
        .to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status.to_string(),
    })
}

/// Readiness check with per-component detail
///
/// Returns:
/// - 200 OK: all critical components healthy
/// - 503 Service Unavailable: one or more critical components unhealthy
pub async fn readiness_check(state: web::Data<AppState>) -> impl Responder {
    let mut checks = HashMap::new();
    let mut overall_status = ComponentStatus::Healthy;

    let start = std::time::Instant::now();
    let pg_check = match sqlx::query("SELECT 1").fetch_one(&state.db).await {
        Ok(_) => ComponentCheck {
            status: ComponentStatus::Healthy,
            message: "PostgreSQL connection successful".to_string(),
            latency_ms: Some(start.elapsed().as_millis() as u64),
        },
        Err(e) => {
            overall_status = ComponentStatus::Unhealthy;
            ComponentCheck {
                status: ComponentStatus::Unhealthy,
                message: format!("PostgreSQL connection failed: {}", e),
                latency_ms: Some(start.elapsed().as_millis() as u64),
            }
        }
    };
    checks.insert("postgresql".to_string(), pg_check);

    let ready = matches!(overall_status, ComponentStatus::Healthy);
    let response = ReadinessResponse {
        ready,
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

pub async fn liveness_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}
