// src/infrastructure/sqlite/migrations.rs
//
// Versioned schema, tracked in the `migrations` table and applied in order.

use rusqlite::Connection;
use tracing::{debug, info};

use crate::infrastructure::{DatabaseError, DatabaseResult};

pub const CURRENT_VERSION: i32 = 2;

pub fn run_migrations(conn: &Connection) -> DatabaseResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM migrations",
        [],
        |row| row.get(0),
    )?;

    info!(current_version, target_version = CURRENT_VERSION, "Running migrations");

    if current_version < 1 {
        migrate_v1_notes(conn).map_err(|e| DatabaseError::Migration(format!("v1 notes: {e}")))?;
    }
    if current_version < 2 {
        migrate_v2_authors(conn)
            .map_err(|e| DatabaseError::Migration(format!("v2 authors: {e}")))?;
    }

    Ok(())
}

fn record_migration(conn: &Connection, version: i32, name: &str) -> DatabaseResult<()> {
    conn.execute(
        "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
        rusqlite::params![version, name],
    )?;
    debug!(version, name, "Migration applied");
    Ok(())
}

fn migrate_v1_notes(conn: &Connection) -> DatabaseResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL CHECK (length(trim(title)) > 0),
            content TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE INDEX idx_notes_updated_at ON notes(updated_at DESC);
        ",
    )?;
    record_migration(conn, 1, "notes")
}

fn migrate_v2_authors(conn: &Connection) -> DatabaseResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE authors (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            middle_name TEXT,
            last_name TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
        CREATE INDEX idx_authors_first_name ON authors(first_name);
        ",
    )?;
    record_migration(conn, 2, "authors")
}
