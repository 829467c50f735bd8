use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Server-side record of an issued refresh token. The token is only
/// honoured while this row exists; deleting it revokes the session.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RefreshToken {
    pub id: Uuid,
    pub token: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
