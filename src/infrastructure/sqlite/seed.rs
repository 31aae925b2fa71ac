// src/infrastructure/sqlite/seed.rs
//
// One-time sample data, applied at startup to tables that are still empty.

use chrono::Duration;
use rusqlite::{params, Connection};
use tracing::info;

use super::{timestamp, DatabasePool};
use crate::infrastructure::DatabaseResult;

const SAMPLE_NOTES: &[(&str, &str)] = &[
    ("Welcome", "Notes are listed with the most recently updated first."),
    ("Editing", "Open a note to change its title or content."),
    ("Searching authors", "Filter the authors table by the start of a first name."),
];

const SAMPLE_AUTHORS: &[(&str, Option<&str>, &str)] = &[
    ("Jane", None, "Austen"),
    ("Charlotte", None, "Bronte"),
    ("Mary", Some("Ann"), "Evans"),
    ("James", None, "Joyce"),
    ("Virginia", None, "Woolf"),
    ("John", Some("Ronald Reuel"), "Tolkien"),
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub notes: usize,
    pub authors: usize,
}

pub fn seed_sample_data(pool: &DatabasePool) -> DatabaseResult<SeedReport> {
    let mut conn = pool.get()?;
    let tx = conn.transaction()?;

    let report = SeedReport {
        notes: seed_notes(&tx)?,
        authors: seed_authors(&tx)?,
    };

    tx.commit()?;
    info!(notes = report.notes, authors = report.authors, "Sample data seeded");
    Ok(report)
}

fn is_empty(conn: &Connection, table: &str) -> DatabaseResult<bool> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })?;
    Ok(count == 0)
}

fn seed_notes(conn: &Connection) -> DatabaseResult<usize> {
    if !is_empty(conn, "notes")? {
        return Ok(0);
    }

    // Spread the stamps so the listing order is stable: first entry ends up on top
    let base = timestamp::now();
    for (offset, (title, content)) in SAMPLE_NOTES.iter().enumerate() {
        let stamp = timestamp::to_sql(&(base - Duration::seconds(offset as i64)));
        conn.execute(
            "INSERT INTO notes (title, content, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
            params![title, content, stamp],
        )?;
    }
    Ok(SAMPLE_NOTES.len())
}

fn seed_authors(conn: &Connection) -> DatabaseResult<usize> {
    if !is_empty(conn, "authors")? {
        return Ok(0);
    }

    for (first_name, middle_name, last_name) in SAMPLE_AUTHORS {
        conn.execute(
            "INSERT INTO authors (first_name, middle_name, last_name) VALUES (?1, ?2, ?3)",
            params![first_name, middle_name, last_name],
        )?;
    }
    Ok(SAMPLE_AUTHORS.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::sqlite::PoolConfig;

    #[test]
    fn given_empty_database_when_seeding_twice_then_inserts_only_once() {
        let temp_dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::open(&temp_dir.path().join("seed.db"), PoolConfig::default()).unwrap();

        let first = seed_sample_data(&pool).unwrap();
        let second = seed_sample_data(&pool).unwrap();

        assert_eq!(first.notes, SAMPLE_NOTES.len());
        assert_eq!(first.authors, SAMPLE_AUTHORS.len());
        assert_eq!(second, SeedReport::default());
    }
}
