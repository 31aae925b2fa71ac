// src/application/mod.rs
pub mod author_query;
pub mod repository;

pub use author_query::AuthorQuery;
pub use repository::{AuthorRepository, NoteRepository};
