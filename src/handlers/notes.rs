/// Note CRUD handlers. All of them run behind the session middleware and
/// only ever touch the authenticated user's rows.
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::db::note_repo;
use crate::error::{AppError, Result};
use crate::middleware::AuthenticatedUser;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateNoteRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 20000))]
    pub content: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateNoteRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 20000))]
    pub content: String,
}

/// Create note endpoint handler
pub async fn create_note(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: web::Json<CreateNoteRequest>,
) -> Result<HttpResponse> {
    payload.validate()?;

    let note = note_repo::create(&state.db, user.0.id, &payload.title, &payload.content).await?;

    Ok(HttpResponse::Created().json(note))
}

/// List notes endpoint handler. Newest first.
pub async fn list_notes(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let notes = note_repo::list_by_user(&state.db, user.0.id).await?;

    Ok(HttpResponse::Ok().json(notes))
}

/// Get note endpoint handler
pub async fn get_note(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let note_id = path.into_inner();

    let note = note_repo::find_by_id(&state.db, note_id, user.0.id)
        .await?
        .ok_or(AppError::NoteNotFound)?;

    Ok(HttpResponse::Ok().json(note))
}

/// Update note endpoint handler
pub async fn update_note(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateNoteRequest>,
) -> Result<HttpResponse> {
    payload.validate()?;

    let note_id = path.into_inner();

    let note = note_repo::update(&state.db, note_id, user.0.id, &payload.title, &payload.content)
        .await?
        .ok_or(AppError::NoteNotFound)?;

    Ok(HttpResponse::Ok().json(note))
}

/// Delete note endpoint handler
pub async fn delete_note(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let note_id = path.into_inner();

    if !note_repo::delete(&state.db, note_id, user.0.id).await? {
        return Err(AppError::NoteNotFound);
    }

    Ok(HttpResponse::NoContent().finish())
}
