/// Note database operations. Every query is scoped to the owning user so
/// another user's notes are indistinguishable from missing ones.
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::Note;

pub async fn create(pool: &PgPool, user_id: Uuid, title: &str, content: &str) -> Result<Note> {
    let note = sqlx::query_as::<_, Note>(
        r#"
        INSERT INTO notes (title, content, user_id)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(note)
}

pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Note>> {
    let notes = sqlx::query_as::<_, Note>(
        "SELECT * FROM notes WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(notes)
}

pub async fn find_by_id(pool: &PgPool, note_id: Uuid, user_id: Uuid) -> Result<Option<Note>> {
    let note = sqlx::query_as::<_, Note>("SELECT * FROM notes WHERE id = $1 AND user_id = $2")
        .bind(note_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(note)
}

/// Replace a note's title and content. Returns `None` when no note with
/// this id belongs to the user.
pub async fn update(
    pool: &PgPool,
    note_id: Uuid,
    user_id: Uuid,
    title: &str,
    content: &str,
) -> Result<Option<Note>> {
    let note = sqlx::query_as::<_, Note>(
        r#"
        UPDATE notes
        SET title = $3, content = $4, updated_at = CURRENT_TIMESTAMP
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(note_id)
    .bind(user_id)
    .bind(title)
    .bind(content)
    .fetch_optional(pool)
    .await?;

    Ok(note)
}

/// Delete a note, returning whether a row was removed
pub async fn delete(pool: &PgPool, note_id: Uuid, user_id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
        .bind(note_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
