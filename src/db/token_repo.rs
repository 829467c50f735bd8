/// Refresh token database operations
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::RefreshToken;

/// Persist a refresh token so the session can later be revoked
pub async fn create(
    pool: &PgPool,
    user_id: Uuid,
    token: &str,
    expires_at: DateTime<Utc>,
) -> Result<RefreshToken> {
    let record = sqlx::query_as::<_, RefreshToken>(
        r#"
        INSERT INTO refresh_tokens (token, user_id, expires_at)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(token)
    .bind(user_id)
    .bind(expires_at)
    .fetch_one(pool)
    .await?;

    Ok(record)
}

/// Find a live session row for the given token and user. Returns `None`
/// when the session was revoked or its row has expired.
pub async fn find_valid(
    pool: &PgPool,
    token: &str,
    user_id: Uuid,
) -> Result<Option<RefreshToken>> {
    let record = sqlx::query_as::<_, RefreshToken>(
        "SELECT * FROM refresh_tokens WHERE token = $1 AND user_id = $2 AND expires_at > NOW()",
    )
    .bind(token)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Delete the session row for a token. Returns the number of rows removed
/// so callers can treat a repeat delete as a no-op.
pub async fn delete_by_token(pool: &PgPool, token: &str) -> Result<u64> {
    let result = sqlx::query("DELETE FROM refresh_tokens WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Sweep rows whose expiry has passed. Expired sessions are already
/// rejected at use time; this exists for out-of-band maintenance.
pub async fn delete_expired(pool: &PgPool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at <= NOW()")
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
