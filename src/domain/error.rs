// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),
    #[error("Note not found: {0}")]
    NoteNotFound(i64),
    #[error("Storage error: {0}")]
    Storage(String),
}
