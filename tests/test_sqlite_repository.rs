mod helpers;

use anyhow::Result;
use helpers::TestDatabase;
use notesapp::application::{AuthorQuery, AuthorRepository, NoteRepository};
use notesapp::domain::{DomainError, NoteDraft};

fn draft(title: &str, content: &str) -> NoteDraft {
    NoteDraft::new(title, content).expect("Draft should be valid")
}

#[test]
fn given_valid_draft_when_creating_then_assigns_id_and_equal_timestamps() -> Result<()> {
    // Arrange
    let db = TestDatabase::new()?;
    let repo = db.notes();

    // Act
    let note = repo.create_note(&draft("A", "B"))?;

    // Assert
    assert_eq!(note.id, 1);
    assert_eq!(note.title, "A");
    assert_eq!(note.content, "B");
    assert_eq!(note.created_at, note.updated_at);
    Ok(())
}

#[test]
fn given_created_notes_when_listing_then_most_recently_updated_first() -> Result<()> {
    // Arrange
    let db = TestDatabase::new()?;
    let repo = db.notes();
    let first = repo.create_note(&draft("First", ""))?;
    let second = repo.create_note(&draft("Second", ""))?;
    std::thread::sleep(std::time::Duration::from_millis(5));
    repo.update_note(first.id, &draft("First, edited", ""))?;

    // Act
    let notes = repo.list_notes()?;

    // Assert
    let ids: Vec<i64> = notes.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
    Ok(())
}

#[test]
fn given_listed_notes_when_getting_each_by_id_then_records_are_equal() -> Result<()> {
    // Arrange
    let db = TestDatabase::seeded()?;
    let repo = db.notes();

    // Act
    let notes = repo.list_notes()?;

    // Assert
    assert!(!notes.is_empty());
    for note in notes {
        assert_eq!(repo.get_note(note.id)?, note);
    }
    Ok(())
}

#[test]
fn given_existing_note_when_updating_then_refreshes_updated_at_only() -> Result<()> {
    // Arrange
    let db = TestDatabase::new()?;
    let repo = db.notes();
    let created = repo.create_note(&draft("Old", "old"))?;

    // Act
    let updated = repo.update_note(created.id, &draft("New", "new"))?;

    // Assert
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "New");
    assert_eq!(updated.content, "new");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= updated.created_at);
    Ok(())
}

#[test]
fn given_missing_id_when_updating_then_not_found_and_nothing_inserted() -> Result<()> {
    // Arrange
    let db = TestDatabase::new()?;
    let repo = db.notes();

    // Act
    let result = repo.update_note(9999, &draft("Ghost", ""));

    // Assert
    assert_eq!(result, Err(DomainError::NoteNotFound(9999)));
    assert!(repo.list_notes()?.is_empty());
    Ok(())
}

#[test]
fn given_deleted_note_when_deleting_again_then_not_found() -> Result<()> {
    // Arrange
    let db = TestDatabase::new()?;
    let repo = db.notes();
    let note = repo.create_note(&draft("Short-lived", ""))?;

    // Act
    let first = repo.delete_note(note.id);
    let second = repo.delete_note(note.id);

    // Assert
    assert!(first.is_ok());
    assert_eq!(second, Err(DomainError::NoteNotFound(note.id)));
    assert_eq!(repo.get_note(note.id), Err(DomainError::NoteNotFound(note.id)));
    Ok(())
}

#[test]
fn given_deleted_note_when_creating_then_id_is_not_reused() -> Result<()> {
    // Arrange
    let db = TestDatabase::new()?;
    let repo = db.notes();
    let note = repo.create_note(&draft("One", ""))?;
    repo.delete_note(note.id)?;

    // Act
    let next = repo.create_note(&draft("Two", ""))?;

    // Assert
    assert!(next.id > note.id);
    Ok(())
}

#[test]
fn given_quote_in_title_when_creating_then_stored_verbatim() -> Result<()> {
    // Arrange
    let db = TestDatabase::new()?;
    let repo = db.notes();
    let title = "Robert'); DROP TABLE notes;--";

    // Act
    let note = repo.create_note(&draft(title, ""))?;

    // Assert
    assert_eq!(repo.get_note(note.id)?.title, title);
    assert_eq!(repo.list_notes()?.len(), 1);
    Ok(())
}

#[test]
fn given_seeded_authors_when_searching_all_then_returns_everyone_sorted() -> Result<()> {
    // Arrange
    let db = TestDatabase::seeded()?;
    let repo = db.authors();

    // Act
    let authors = repo.search_authors(&AuthorQuery::All)?;

    // Assert
    let last_names: Vec<&str> = authors.iter().map(|a| a.last_name.as_str()).collect();
    let mut sorted = last_names.clone();
    sorted.sort();
    assert_eq!(authors.len(), 6);
    assert_eq!(last_names, sorted);
    Ok(())
}

#[test]
fn given_lowercase_prefix_when_searching_then_matches_case_insensitively() -> Result<()> {
    // Arrange
    let db = TestDatabase::seeded()?;
    let repo = db.authors();

    // Act
    let authors = repo.search_authors(&AuthorQuery::Prefix("ja".to_string()))?;

    // Assert
    let first_names: Vec<&str> = authors.iter().map(|a| a.first_name.as_str()).collect();
    assert_eq!(first_names, vec!["Jane", "James"]);
    Ok(())
}

#[test]
fn given_injection_attempt_when_searching_then_matches_nothing() -> Result<()> {
    // Arrange
    let db = TestDatabase::seeded()?;
    let repo = db.authors();

    // Act
    let authors = repo.search_authors(&AuthorQuery::Prefix("' OR '1'='1".to_string()))?;

    // Assert
    assert!(authors.is_empty());
    assert_eq!(repo.search_authors(&AuthorQuery::All)?.len(), 6);
    Ok(())
}

#[test]
fn given_wildcard_characters_when_searching_then_treated_literally() -> Result<()> {
    // Arrange
    let db = TestDatabase::seeded()?;
    let repo = db.authors();

    // Act
    let percent = repo.search_authors(&AuthorQuery::Prefix("%".to_string()))?;
    let underscore = repo.search_authors(&AuthorQuery::Prefix("_ane".to_string()))?;

    // Assert
    assert!(percent.is_empty());
    assert!(underscore.is_empty());
    Ok(())
}

#[test]
fn given_accented_first_name_when_searching_any_case_then_matches() -> Result<()> {
    // Arrange
    let db = TestDatabase::seeded()?;
    db.pool.get()?.execute(
        "INSERT INTO authors (first_name, last_name) VALUES (?1, ?2)",
        rusqlite::params!["Émile", "Zola"],
    )?;
    let repo = db.authors();

    // Act
    let lower = repo.search_authors(&AuthorQuery::Prefix("é".to_string()))?;
    let upper = repo.search_authors(&AuthorQuery::Prefix("ÉMI".to_string()))?;

    // Assert
    assert_eq!(lower.len(), 1);
    assert_eq!(lower[0].last_name, "Zola");
    assert_eq!(upper, lower);
    Ok(())
}
