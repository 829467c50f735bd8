use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::time::Instant;
use uuid::Uuid;

use crate::db::{token_repo, user_repo};
use crate::error::{AppError, Result};
use crate::metrics;
use crate::models::User;
use crate::security::jwt::{TokenCodec, TokenKind};
use crate::security::password;

/// Token pair issued at login. The refresh token is also persisted
/// server-side so the session can be revoked.
#[derive(Debug)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    /// Refresh token lifetime in seconds, used for the cookie max-age
    pub refresh_expires_in: i64,
}

/// A fresh access token issued by the refresh endpoint
#[derive(Debug)]
pub struct AccessGrant {
    pub access_token: String,
    pub expires_in: i64,
}

/// Signup, login, logout and token refresh flows
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    codec: TokenCodec,
}

impl AuthService {
    pub fn new(db: PgPool, codec: TokenCodec) -> Self {
        Self { db, codec }
    }

    /// Register a new user with a hashed password
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User> {
        let start = Instant::now();
        let password_hash = password::hash_password(password)?;
        metrics::PASSWORD_HASH_DURATION_SECONDS
            .with_label_values(&["hash"])
            .observe(start.elapsed().as_secs_f64());

        let user = match user_repo::create(&self.db, name, email, &password_hash).await {
            Ok(user) => user,
            Err(e) => {
                metrics::REGISTRATION_TOTAL
                    .with_label_values(&["failure"])
                    .inc();
                return Err(e);
            }
        };

        metrics::REGISTRATION_TOTAL
            .with_label_values(&["success"])
            .inc();
        tracing::info!("User registered: {}", user.email);

        Ok(user)
    }

    /// Verify credentials and issue an access/refresh token pair.
    ///
    /// An unknown email and a wrong password fail identically so the
    /// response does not reveal which accounts exist.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionTokens> {
        let user = match user_repo::find_by_email(&self.db, email).await? {
            Some(user) => user,
            None => {
                metrics::LOGIN_ATTEMPTS_TOTAL
                    .with_label_values(&["failure"])
                    .inc();
                return Err(AppError::InvalidCredentials);
            }
        };

        let start = Instant::now();
        let verified = password::verify_password(password, &user.password_hash);
        metrics::PASSWORD_HASH_DURATION_SECONDS
            .with_label_values(&["verify"])
            .observe(start.elapsed().as_secs_f64());

        if let Err(e) = verified {
            metrics::LOGIN_ATTEMPTS_TOTAL
                .with_label_values(&["failure"])
                .inc();
            return Err(e);
        }

        let access_token = self.codec.issue_access_token(user.id)?;
        let refresh_token = self.codec.issue_refresh_token(user.id)?;

        let expires_at = Utc::now() + Duration::seconds(self.codec.refresh_ttl_secs());
        token_repo::create(&self.db, user.id, &refresh_token, expires_at).await?;

        metrics::LOGIN_ATTEMPTS_TOTAL
            .with_label_values(&["success"])
            .inc();
        tracing::info!("User logged in: {}", user.email);

        Ok(SessionTokens {
            access_token,
            refresh_token,
            expires_in: self.codec.access_ttl_secs(),
            refresh_expires_in: self.codec.refresh_ttl_secs(),
        })
    }

    /// Exchange a live refresh token for a new access token.
    ///
    /// The refresh token is not rotated; the same one stays valid until
    /// it expires or the session is logged out. The token must still
    /// have its session row, a signature alone is not enough.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AccessGrant> {
        let claims = match self.codec.verify(refresh_token, TokenKind::Refresh) {
            Ok(claims) => claims,
            Err(e) => {
                metrics::TOKEN_REFRESH_TOTAL
                    .with_label_values(&["failure"])
                    .inc();
                return Err(e);
            }
        };

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::InvalidToken)?;

        if token_repo::find_valid(&self.db, refresh_token, user_id)
            .await?
            .is_none()
        {
            metrics::TOKEN_REFRESH_TOTAL
                .with_label_values(&["failure"])
                .inc();
            return Err(AppError::SessionRevoked);
        }

        let access_token = self.codec.issue_access_token(user_id)?;

        metrics::TOKEN_REFRESH_TOTAL
            .with_label_values(&["success"])
            .inc();
        tracing::debug!("Access token refreshed for user {}", user_id);

        Ok(AccessGrant {
            access_token,
            expires_in: self.codec.access_ttl_secs(),
        })
    }

    /// Revoke the session behind a refresh token. Deleting an already
    /// removed session is a no-op so logout stays idempotent.
    pub async fn logout(&self, refresh_token: &str) -> Result<()> {
        let removed = token_repo::delete_by_token(&self.db, refresh_token).await?;

        if removed > 0 {
            tracing::info!("Session revoked");
        }

        Ok(())
    }
}
