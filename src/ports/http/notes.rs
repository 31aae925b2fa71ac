// src/ports/http/notes.rs
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::info;

use super::context::run_blocking;
use super::{ApiError, AppContext};
use crate::constants::NOTE_DELETED;
use crate::domain::{Note, NoteInput};

pub fn router() -> Router<AppContext> {
    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route(
            "/notes/{id}",
            get(get_note).put(update_note).delete(delete_note),
        )
}

fn note_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| ApiError::InvalidId(rejection.body_text()))
}

fn note_input(body: Result<Json<NoteInput>, JsonRejection>) -> Result<NoteInput, ApiError> {
    body.map(|Json(input)| input)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

async fn list_notes(State(ctx): State<AppContext>) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = run_blocking(move || ctx.notes.list_notes()).await?;
    info!(count = notes.len(), "Fetched notes");
    Ok(Json(notes))
}

async fn get_note(
    State(ctx): State<AppContext>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Note>, ApiError> {
    let id = note_id(path)?;
    let note = run_blocking(move || ctx.notes.get_note(id)).await?;
    Ok(Json(note))
}

async fn create_note(
    State(ctx): State<AppContext>,
    body: Result<Json<NoteInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    // Rejected drafts never reach the repository
    let draft = note_input(body)?.validate()?;
    let note = run_blocking(move || ctx.notes.create_note(&draft)).await?;
    info!(note_id = note.id, "Note created");
    Ok((StatusCode::CREATED, Json(note)))
}

async fn update_note(
    State(ctx): State<AppContext>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<NoteInput>, JsonRejection>,
) -> Result<Json<Note>, ApiError> {
    let id = note_id(path)?;
    let draft = note_input(body)?.validate()?;
    let note = run_blocking(move || ctx.notes.update_note(id, &draft)).await?;
    info!(note_id = id, "Note updated");
    Ok(Json(note))
}

async fn delete_note(
    State(ctx): State<AppContext>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = note_id(path)?;
    run_blocking(move || ctx.notes.delete_note(id)).await?;
    info!(note_id = id, "Note deleted");
    Ok(Json(json!({ "message": NOTE_DELETED })))
}
