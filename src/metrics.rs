/// Prometheus metrics for the authentication flows
use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, Registry,
    TextEncoder,
};

lazy_static! {
    /// Registry gathered by the /metrics endpoint
    pub static ref REGISTRY: Registry = Registry::new();

    /// Total login attempts (labels: status=success|failure)
    pub static ref LOGIN_ATTEMPTS_TOTAL: CounterVec = register_counter_vec!(
        "auth_login_attempts_total",
        "Total number of login attempts",
        &["status"]
    )
    .unwrap();

    /// Total user registrations (labels: status=success|failure)
    pub static ref REGISTRATION_TOTAL: CounterVec = register_counter_vec!(
        "auth_registration_total",
        "Total number of user registrations",
        &["status"]
    )
    .unwrap();

    /// Total token refresh attempts (labels: status=success|failure)
    pub static ref TOKEN_REFRESH_TOTAL: CounterVec = register_counter_vec!(
        "auth_token_refresh_total",
        "Total number of token refresh attempts",
        &["status"]
    )
    .unwrap();

    /// Password hashing duration in seconds (labels: operation=hash|verify)
    pub static ref PASSWORD_HASH_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "auth_password_hash_duration_seconds",
        "Time spent hashing passwords with Argon2",
        &["operation"],
        vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.0]
    )
    .unwrap();
}

/// Register all metrics with the service registry. Called once at startup.
pub fn init_metrics() {
    REGISTRY
        .register(Box::new(LOGIN_ATTEMPTS_TOTAL.clone()))
        .expect("Failed to register LOGIN_ATTEMPTS_TOTAL");

    REGISTRY
        .register(Box::new(REGISTRATION_TOTAL.clone()))
        .expect("Failed to register REGISTRATION_TOTAL");

    REGISTRY
        .register(Box::new(TOKEN_REFRESH_TOTAL.clone()))
        .expect("Failed to register TOKEN_REFRESH_TOTAL");

    REGISTRY
        .register(Box::new(PASSWORD_HASH_DURATION_SECONDS.clone()))
        .expect("Failed to register PASSWORD_HASH_DURATION_SECONDS");

    tracing::info!("Prometheus metrics initialized");
}

/// Gather all metrics in Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }

    String::from_utf8(buffer).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Once;

    static INIT: Once = Once::new();

    fn init_test_metrics() {
        INIT.call_once(init_metrics);
    }

    #[test]
    fn test_counters_appear_in_gathered_output() {
        init_test_metrics();

        LOGIN_ATTEMPTS_TOTAL.with_label_values(&["success"]).inc();
        REGISTRATION_TOTAL.with_label_values(&["failure"]).inc();
        TOKEN_REFRESH_TOTAL.with_label_values(&["success"]).inc();

        let metrics = gather_metrics();
        assert!(metrics.contains("auth_login_attempts_total"));
        assert!(metrics.contains("auth_registration_total"));
        assert!(metrics.contains("auth_token_refresh_total"));
    }

    #[test]
    fn test_histogram_records_observations() {
        init_test_metrics();

        PASSWORD_HASH_DURATION_SECONDS
            .with_label_values(&["hash"])
            .observe(0.05);

        let metrics = gather_metrics();
        assert!(metrics.contains("auth_password_hash_duration_seconds"));
    }
}
