// src/util/testing.rs

use anyhow::Result;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::env;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{AuthorQuery, AuthorRepository, NoteRepository};
use crate::client::{ClientError, IntentKind, NotesApi};
use crate::domain::{AppInfo, AuthorName, DomainError, Note, NoteDraft};
use crate::infrastructure::sqlite::timestamp;

struct NoteTable {
    rows: BTreeMap<i64, Note>,
    next_id: i64,
    storage_error: Option<String>,
}

/// In-memory `NoteRepository` with the same observable rules as the SQLite one:
/// server-assigned ids, `created_at == updated_at` on insert, no upsert, newest first.
///
/// # Examples
///
/// ```
/// use notesapp::application::NoteRepository;
/// use notesapp::domain::NoteDraft;
/// use notesapp::util::testing::MockNoteRepository;
///
/// let repo = MockNoteRepository::builder()
///     .with_note("Question", "Answer")
///     .build();
/// let created = repo.create_note(&NoteDraft::new("Second", "").unwrap()).unwrap();
/// assert_eq!(created.id, 2);
/// ```
#[derive(Clone)]
pub struct MockNoteRepository {
    table: Arc<Mutex<NoteTable>>,
}

impl MockNoteRepository {
    pub fn builder() -> MockNoteRepositoryBuilder {
        MockNoteRepositoryBuilder::new()
    }

    fn table(&self) -> MutexGuard<'_, NoteTable> {
        self.table.lock().expect("mock note table poisoned")
    }

    fn check_storage(table: &NoteTable) -> Result<(), DomainError> {
        match &table.storage_error {
            Some(message) => Err(DomainError::Storage(message.clone())),
            None => Ok(()),
        }
    }

    /// Number of stored notes, bypassing any configured failure
    pub fn len(&self) -> usize {
        self.table().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NoteRepository for MockNoteRepository {
    fn list_notes(&self) -> Result<Vec<Note>, DomainError> {
        let table = self.table();
        Self::check_storage(&table)?;
        let mut notes: Vec<Note> = table.rows.values().cloned().collect();
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(notes)
    }

    fn get_note(&self, id: i64) -> Result<Note, DomainError> {
        let table = self.table();
        Self::check_storage(&table)?;
        table
            .rows
            .get(&id)
            .cloned()
            .ok_or(DomainError::NoteNotFound(id))
    }

    fn create_note(&self, draft: &NoteDraft) -> Result<Note, DomainError> {
        let mut table = self.table();
        Self::check_storage(&table)?;
        let now = timestamp::now();
        let note = Note {
            id: table.next_id,
            title: draft.title.clone(),
            content: draft.content.clone(),
            created_at: now,
            updated_at: now,
        };
        table.next_id += 1;
        table.rows.insert(note.id, note.clone());
        Ok(note)
    }

    fn update_note(&self, id: i64, draft: &NoteDraft) -> Result<Note, DomainError> {
        let mut table = self.table();
        Self::check_storage(&table)?;
        let note = table
            .rows
            .get_mut(&id)
            .ok_or(DomainError::NoteNotFound(id))?;
        note.title = draft.title.clone();
        note.content = draft.content.clone();
        note.updated_at = timestamp::now().max(note.created_at);
        Ok(note.clone())
    }

    fn delete_note(&self, id: i64) -> Result<(), DomainError> {
        let mut table = self.table();
        Self::check_storage(&table)?;
        table
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::NoteNotFound(id))
    }
}

/// Builder for MockNoteRepository
///
/// Provides a fluent interface for configuring mock behavior.
pub struct MockNoteRepositoryBuilder {
    drafts: Vec<(String, String)>,
    storage_error: Option<String>,
}

impl MockNoteRepositoryBuilder {
    pub fn new() -> Self {
        Self {
            drafts: vec![],
            storage_error: None,
        }
    }

    /// Pre-insert a note; ids are assigned in call order starting at 1
    pub fn with_note(mut self, title: &str, content: &str) -> Self {
        self.drafts.push((title.to_string(), content.to_string()));
        self
    }

    /// Make every call fail with `DomainError::Storage(message)`
    pub fn with_storage_error(mut self, message: &str) -> Self {
        self.storage_error = Some(message.to_string());
        self
    }

    pub fn build(self) -> MockNoteRepository {
        let repo = MockNoteRepository {
            table: Arc::new(Mutex::new(NoteTable {
                rows: BTreeMap::new(),
                next_id: 1,
                storage_error: None,
            })),
        };
        for (title, content) in self.drafts {
            let draft = NoteDraft { title, content };
            repo.create_note(&draft)
                .expect("Seeding the mock repository cannot fail");
        }
        repo.table().storage_error = self.storage_error;
        repo
    }
}

impl Default for MockNoteRepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory author table using the same prefix semantics as the SQL query
#[derive(Clone, Default)]
pub struct MockAuthorRepository {
    authors: Vec<AuthorName>,
}

impl MockAuthorRepository {
    pub fn with_authors(names: &[(&str, &str)]) -> Self {
        Self {
            authors: names
                .iter()
                .map(|(first, last)| AuthorName {
                    first_name: first.to_string(),
                    last_name: last.to_string(),
                })
                .collect(),
        }
    }
}

impl AuthorRepository for MockAuthorRepository {
    fn search_authors(&self, query: &AuthorQuery) -> Result<Vec<AuthorName>, DomainError> {
        let mut found: Vec<AuthorName> = self
            .authors
            .iter()
            .filter(|a| query.matches(&a.first_name))
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
        });
        Ok(found)
    }
}

/// `NotesApi` backed by a `MockNoteRepository`, for driving the effect coordinator
/// without a server. Selected intent kinds can be made to fail with an HTTP 500.
#[derive(Clone)]
pub struct FakeNotesApi {
    notes: MockNoteRepository,
    authors: MockAuthorRepository,
    failing: Arc<Mutex<HashSet<IntentKind>>>,
    calls: Arc<Mutex<Vec<IntentKind>>>,
}

impl FakeNotesApi {
    pub fn new(notes: MockNoteRepository, authors: MockAuthorRepository) -> Self {
        Self {
            notes,
            authors,
            failing: Arc::new(Mutex::new(HashSet::new())),
            calls: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn fail(&self, kind: IntentKind) {
        self.failing.lock().expect("fake api poisoned").insert(kind);
    }

    /// Intent kinds in the order the fake received calls for them
    pub fn calls(&self) -> Vec<IntentKind> {
        self.calls.lock().expect("fake api poisoned").clone()
    }

    fn record(&self, kind: IntentKind) -> Result<(), ClientError> {
        self.calls.lock().expect("fake api poisoned").push(kind);
        if self.failing.lock().expect("fake api poisoned").contains(&kind) {
            return Err(ClientError::Http {
                status: 500,
                message: "Internal Server Error".to_string(),
            });
        }
        Ok(())
    }
}

fn as_client_error(err: DomainError) -> ClientError {
    let status = match err {
        DomainError::Validation(_) => 400,
        DomainError::NoteNotFound(_) => 404,
        DomainError::Storage(_) => 500,
    };
    ClientError::Http {
        status,
        message: err.to_string(),
    }
}

#[async_trait]
impl NotesApi for FakeNotesApi {
    async fn list_notes(&self) -> Result<Vec<Note>, ClientError> {
        self.record(IntentKind::Fetch)?;
        self.notes.list_notes().map_err(as_client_error)
    }

    async fn get_note(&self, id: i64) -> Result<Note, ClientError> {
        self.notes.get_note(id).map_err(as_client_error)
    }

    async fn create_note(&self, draft: &NoteDraft) -> Result<Note, ClientError> {
        self.record(IntentKind::Create)?;
        self.notes.create_note(draft).map_err(as_client_error)
    }

    async fn update_note(&self, id: i64, draft: &NoteDraft) -> Result<Note, ClientError> {
        self.record(IntentKind::Update)?;
        self.notes.update_note(id, draft).map_err(as_client_error)
    }

    async fn delete_note(&self, id: i64) -> Result<String, ClientError> {
        self.record(IntentKind::Delete)?;
        self.notes
            .delete_note(id)
            .map(|_| "Note deleted successfully".to_string())
            .map_err(as_client_error)
    }

    async fn search_authors(&self, first_name: &str) -> Result<Vec<AuthorName>, ClientError> {
        self.record(IntentKind::SearchAuthors)?;
        let query = AuthorQuery::parse(Some(first_name)).map_err(as_client_error)?;
        self.authors.search_authors(&query).map_err(as_client_error)
    }

    async fn version(&self) -> Result<AppInfo, ClientError> {
        Ok(AppInfo {
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "test".to_string(),
        })
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "reqwest", "mio", "r2d2", "tower_http"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[ctor::ctor]
    fn init() {
        init_test_setup().expect("Failed to initialize test setup");
    }

    #[test]
    fn given_seeded_notes_when_listing_then_newest_first() {
        let repo = MockNoteRepository::builder()
            .with_note("First", "")
            .with_note("Second", "")
            .build();

        let notes = repo.list_notes().expect("List should succeed");

        let ids: Vec<i64> = notes.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn given_unknown_id_when_updating_then_returns_not_found_without_insert() {
        let repo = MockNoteRepository::builder().build();
        let draft = NoteDraft::new("Ghost", "").unwrap();

        let result = repo.update_note(5, &draft);

        assert_eq!(result, Err(DomainError::NoteNotFound(5)));
        assert!(repo.is_empty());
    }

    #[test]
    fn given_storage_error_configured_when_listing_then_returns_storage_error() {
        let repo = MockNoteRepository::builder()
            .with_note("Kept", "")
            .with_storage_error("database is locked")
            .build();

        let result = repo.list_notes();

        assert!(matches!(result, Err(DomainError::Storage(_))));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn given_authors_when_searching_prefix_then_filters_case_insensitively() {
        let repo = MockAuthorRepository::with_authors(&[("Jane", "Austen"), ("James", "Joyce"), ("Virginia", "Woolf")]);

        let found = repo
            .search_authors(&AuthorQuery::Prefix("ja".to_string()))
            .expect("Search should succeed");

        let last_names: Vec<&str> = found.iter().map(|a| a.last_name.as_str()).collect();
        assert_eq!(last_names, vec!["Austen", "Joyce"]);
    }

    #[tokio::test]
    async fn given_failing_kind_when_calling_fake_api_then_returns_http_error() {
        let api = FakeNotesApi::new(MockNoteRepository::builder().build(), MockAuthorRepository::default());
        api.fail(IntentKind::Fetch);

        let result = api.list_notes().await;

        assert!(matches!(result, Err(ClientError::Http { status: 500, .. })));
        assert_eq!(api.calls(), vec![IntentKind::Fetch]);
    }
}
