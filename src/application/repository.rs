// src/application/repository.rs
use crate::application::AuthorQuery;
use crate::domain::{AuthorName, DomainError, Note, NoteDraft};

/// CRUD over the notes table.
///
/// Implementations are shared between concurrent request handlers, so every method
/// takes `&self` and acquires whatever connection it needs per call.
pub trait NoteRepository: Send + Sync {
    /// All notes, most recently updated first
    fn list_notes(&self) -> Result<Vec<Note>, DomainError>;

    fn get_note(&self, id: i64) -> Result<Note, DomainError>;

    /// Insert a note; the store assigns `id` and stamps both timestamps with the same instant
    fn create_note(&self, draft: &NoteDraft) -> Result<Note, DomainError>;

    /// Overwrite title and content of an existing note and refresh `updated_at`.
    /// Never inserts: an unknown id is `NoteNotFound`.
    fn update_note(&self, id: i64, draft: &NoteDraft) -> Result<Note, DomainError>;

    /// Hard delete
    fn delete_note(&self, id: i64) -> Result<(), DomainError>;
}

pub trait AuthorRepository: Send + Sync {
    fn search_authors(&self, query: &AuthorQuery) -> Result<Vec<AuthorName>, DomainError>;
}
