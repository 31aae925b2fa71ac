// src/infrastructure/mod.rs
pub mod config;
pub mod error;
pub mod sqlite;

pub use config::Config;
pub use error::{DatabaseError, DatabaseResult};
pub use sqlite::{DatabasePool, PoolConfig, SqliteAuthorRepository, SqliteNoteRepository};
