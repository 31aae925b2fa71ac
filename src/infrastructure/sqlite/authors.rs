// src/infrastructure/sqlite/authors.rs
use rusqlite::{params, Row};
use tracing::{debug, instrument};

use super::pool::UNICODE_LOWER;
use super::DatabasePool;
use crate::application::{AuthorQuery, AuthorRepository};
use crate::domain::{AuthorName, DomainError};
use crate::infrastructure::DatabaseError;

#[derive(Clone)]
pub struct SqliteAuthorRepository {
    pool: DatabasePool,
}

impl SqliteAuthorRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn row_to_author(row: &Row<'_>) -> rusqlite::Result<AuthorName> {
    Ok(AuthorName {
        first_name: row.get(0)?,
        last_name: row.get(1)?,
    })
}

impl AuthorRepository for SqliteAuthorRepository {
    #[instrument(level = "debug", skip(self))]
    fn search_authors(&self, query: &AuthorQuery) -> Result<Vec<AuthorName>, DomainError> {
        let conn = self.pool.get()?;

        // The term is bound as a parameter, never spliced into the statement.
        // Both sides are lowercased in Rust terms so non-ASCII letters match too.
        let authors = match query.like_pattern() {
            None => {
                let mut stmt = conn
                    .prepare(
                        "SELECT first_name, last_name FROM authors
                         ORDER BY last_name, first_name",
                    )
                    .map_err(DatabaseError::from)?;
                let rows = stmt
                    .query_map([], row_to_author)
                    .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
                    .map_err(DatabaseError::from)?;
                rows
            }
            Some(pattern) => {
                let mut stmt = conn
                    .prepare(&format!(
                        "SELECT first_name, last_name FROM authors
                         WHERE {UNICODE_LOWER}(first_name) LIKE ?1 ESCAPE '\\'
                         ORDER BY last_name, first_name"
                    ))
                    .map_err(DatabaseError::from)?;
                let rows = stmt
                    .query_map(params![pattern], row_to_author)
                    .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
                    .map_err(DatabaseError::from)?;
                rows
            }
        };

        debug!(count = authors.len(), "Author search finished");
        Ok(authors)
    }
}
