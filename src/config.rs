use serde::Deserialize;

/// Service configuration loaded from environment variables.
///
/// `DATABASE_URL` and `JWT_SECRET` are required; everything else has a
/// default suitable for local development.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_db_max_connections")]
    pub database_max_connections: u32,

    #[serde(default = "default_access_token_ttl")]
    pub access_token_ttl_secs: i64,

    #[serde(default = "default_refresh_token_ttl")]
    pub refresh_token_ttl_secs: i64,

    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_db_max_connections() -> u32 {
    20
}

fn default_access_token_ttl() -> i64 {
    900 // 15 minutes
}

fn default_refresh_token_ttl() -> i64 {
    604800 // 7 days
}

fn default_cors_allowed_origins() -> String {
    "http://localhost:3000".to_string()
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        let config: Config = envy::from_env()?;

        // An empty secret would let anyone forge tokens
        if config.jwt_secret.is_empty() {
            return Err(envy::Error::Custom(
                "JWT_SECRET must not be empty".to_string(),
            ));
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_values() {
        assert_eq!(default_host(), "0.0.0.0");
        assert_eq!(default_port(), 8080);
        assert_eq!(default_db_max_connections(), 20);
        assert_eq!(default_access_token_ttl(), 900);
        assert_eq!(default_refresh_token_ttl(), 604800);
    }

    #[test]
    #[serial]
    fn test_from_env_applies_defaults() {
        std::env::set_var("DATABASE_URL", "postgres://localhost/notes");
        std::env::set_var("JWT_SECRET", "test-secret");
        for var in [
            "HOST",
            "PORT",
            "DATABASE_MAX_CONNECTIONS",
            "ACCESS_TOKEN_TTL_SECS",
            "REFRESH_TOKEN_TTL_SECS",
            "CORS_ALLOWED_ORIGINS",
        ] {
            std::env::remove_var(var);
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.access_token_ttl_secs, 900);
        assert_eq!(config.refresh_token_ttl_secs, 604800);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");

        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("JWT_SECRET");
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_empty_secret() {
        std::env::set_var("DATABASE_URL", "postgres://localhost/notes");
        std::env::set_var("JWT_SECRET", "");

        assert!(Config::from_env().is_err());

        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("JWT_SECRET");
    }

    #[test]
    #[serial]
    fn test_from_env_requires_database_url() {
        std::env::remove_var("DATABASE_URL");
        std::env::set_var("JWT_SECRET", "test-secret");

        assert!(Config::from_env().is_err());

        std::env::remove_var("JWT_SECRET");
    }
}
