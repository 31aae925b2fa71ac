// src/infrastructure/error.rs
use thiserror::Error;

use crate::domain::DomainError;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Driver details survive in the message; callers above the repository only see `Storage`.
impl From<DatabaseError> for DomainError {
    fn from(err: DatabaseError) -> Self {
        DomainError::Storage(err.to_string())
    }
}
