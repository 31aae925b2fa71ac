// src/infrastructure/sqlite/notes.rs
use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, info, instrument};

use super::{timestamp, DatabasePool};
use crate::application::NoteRepository;
use crate::domain::{DomainError, Note, NoteDraft};
use crate::infrastructure::DatabaseError;

const NOTE_COLUMNS: &str = "id, title, content, created_at, updated_at";

#[derive(Clone)]
pub struct SqliteNoteRepository {
    pool: DatabasePool,
}

impl SqliteNoteRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn row_to_note(row: &Row<'_>) -> rusqlite::Result<Note> {
    let created_at: String = row.get(3)?;
    let updated_at: String = row.get(4)?;
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        created_at: timestamp::from_sql(3, &created_at)?,
        updated_at: timestamp::from_sql(4, &updated_at)?,
    })
}

impl NoteRepository for SqliteNoteRepository {
    #[instrument(level = "debug", skip(self))]
    fn list_notes(&self) -> Result<Vec<Note>, DomainError> {
        let conn = self.pool.get()?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {NOTE_COLUMNS} FROM notes ORDER BY updated_at DESC, id DESC"
            ))
            .map_err(DatabaseError::from)?;
        let notes = stmt
            .query_map([], row_to_note)
            .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
            .map_err(DatabaseError::from)?;

        debug!(count = notes.len(), "Listed notes");
        Ok(notes)
    }

    #[instrument(level = "debug", skip(self))]
    fn get_note(&self, id: i64) -> Result<Note, DomainError> {
        let conn = self.pool.get()?;
        conn.query_row(
            &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1"),
            params![id],
            row_to_note,
        )
        .optional()
        .map_err(DatabaseError::from)?
        .ok_or(DomainError::NoteNotFound(id))
    }

    #[instrument(level = "debug", skip(self, draft), fields(title = %draft.title))]
    fn create_note(&self, draft: &NoteDraft) -> Result<Note, DomainError> {
        let conn = self.pool.get()?;
        let now = timestamp::to_sql(&timestamp::now());
        let note = conn
            .query_row(
                &format!(
                    "INSERT INTO notes (title, content, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?3)
                     RETURNING {NOTE_COLUMNS}"
                ),
                params![draft.title, draft.content, now],
                row_to_note,
            )
            .map_err(DatabaseError::from)?;

        info!(note_id = note.id, "Created note");
        Ok(note)
    }

    #[instrument(level = "debug", skip(self, draft))]
    fn update_note(&self, id: i64, draft: &NoteDraft) -> Result<Note, DomainError> {
        let conn = self.pool.get()?;
        let now = timestamp::to_sql(&timestamp::now());
        // MAX keeps updated_at >= created_at even if the clock went backwards
        let updated = conn
            .query_row(
                &format!(
                    "UPDATE notes
                     SET title = ?1, content = ?2, updated_at = MAX(?3, created_at)
                     WHERE id = ?4
                     RETURNING {NOTE_COLUMNS}"
                ),
                params![draft.title, draft.content, now, id],
                row_to_note,
            )
            .optional()
            .map_err(DatabaseError::from)?;

        match updated {
            Some(note) => {
                info!(note_id = id, "Updated note");
                Ok(note)
            }
            None => {
                debug!(note_id = id, "Note not found for update");
                Err(DomainError::NoteNotFound(id))
            }
        }
    }

    #[instrument(level = "debug", skip(self))]
    fn delete_note(&self, id: i64) -> Result<(), DomainError> {
        let conn = self.pool.get()?;
        let deleted = conn
            .execute("DELETE FROM notes WHERE id = ?1", params![id])
            .map_err(DatabaseError::from)?;

        if deleted == 0 {
            debug!(note_id = id, "Note not found for deletion");
            return Err(DomainError::NoteNotFound(id));
        }

        info!(note_id = id, "Deleted note");
        Ok(())
    }
}
