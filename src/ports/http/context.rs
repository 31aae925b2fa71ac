// src/ports/http/context.rs
use std::sync::Arc;

use super::ApiError;
use crate::application::{AuthorRepository, NoteRepository};
use crate::domain::{AppInfo, DomainError};

/// Everything handlers share, built once at startup and cloned into each request.
#[derive(Clone)]
pub struct AppContext {
    pub notes: Arc<dyn NoteRepository>,
    pub authors: Arc<dyn AuthorRepository>,
    pub info: AppInfo,
}

impl AppContext {
    pub fn new(
        notes: Arc<dyn NoteRepository>,
        authors: Arc<dyn AuthorRepository>,
        info: AppInfo,
    ) -> Self {
        Self {
            notes,
            authors,
            info,
        }
    }
}

/// Repository calls block on SQLite, so they run on the blocking pool.
pub async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, DomainError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("repository task failed: {e}")))?
        .map_err(ApiError::from)
}
