// src/domain/mod.rs
pub mod app_info;
pub mod author;
pub mod error;
pub mod note;

pub use app_info::AppInfo;
pub use author::AuthorName;
pub use error::DomainError;
pub use note::{Note, NoteDraft, NoteInput};
