// src/cli/commands.rs
//
// Client-side commands. List/create/update/delete/search go through the store and
// the effect coordinator exactly like the browser client; `show` and `version` are
// plain adapter calls.

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::cli::args::{ClientArgs, NotesCommand};
use crate::client::{
    Action, EffectCoordinator, EffectOutcome, HttpNotesApi, Intent, NotesApi, State, Store,
};
use crate::domain::{AuthorName, Note, NoteDraft};
use crate::util::text::preview;

const PREVIEW_CHARS: usize = 60;

struct Session {
    api: Arc<dyn NotesApi>,
    store: Store,
    coordinator: EffectCoordinator,
}

impl Session {
    fn connect(client: &ClientArgs) -> Result<Self> {
        let api: Arc<dyn NotesApi> = Arc::new(
            HttpNotesApi::new(&client.server)
                .with_context(|| format!("Cannot use server URL {}", client.server))?,
        );
        let store = Store::default();
        let coordinator = EffectCoordinator::start(Arc::clone(&api), store.clone());
        debug!(server = %client.server, "Client session started");
        Ok(Self {
            api,
            store,
            coordinator,
        })
    }

    async fn run(&self, intent: Intent) -> Result<State> {
        let kind = intent.kind();
        match self.coordinator.dispatch_and_wait(intent).await? {
            EffectOutcome::Completed => Ok(self.store.state()),
            EffectOutcome::Failed(message) => Err(anyhow!("{kind} failed: {message}")),
        }
    }

    async fn close(self) {
        self.coordinator.shutdown().await;
    }
}

pub async fn run_notes(client: ClientArgs, command: NotesCommand) -> Result<()> {
    let session = Session::connect(&client)?;
    let result = notes_command(&session, &client, command).await;
    session.close().await;
    result
}

async fn notes_command(session: &Session, client: &ClientArgs, command: NotesCommand) -> Result<()> {
    match command {
        NotesCommand::List => {
            let state = session.run(Intent::FetchNotes).await?;
            print_notes(&state.notes, client.json)
        }
        NotesCommand::Show { note_id } => {
            let note = session.api.get_note(note_id).await?;
            print_note(&note, client.json)
        }
        NotesCommand::Create { title, content } => {
            let draft = NoteDraft::new(title, content)?;
            let state = session.run(Intent::CreateNote(draft)).await?;
            let created = state
                .notes
                .first()
                .cloned()
                .context("Created note missing from state")?;
            info!(note_id = created.id, "Note created");
            print_note(&created, client.json)
        }
        NotesCommand::Update {
            note_id,
            title,
            content,
        } => {
            if title.is_none() && content.is_none() {
                bail!("Nothing to update: pass --title and/or --content");
            }

            let state = session.run(Intent::FetchNotes).await?;
            let current = state
                .notes
                .into_iter()
                .find(|n| n.id == note_id)
                .with_context(|| format!("Note not found: {note_id}"))?;
            session.store.dispatch(Action::SetCurrentNote(current.clone()));

            let draft = NoteDraft::new(
                title.unwrap_or(current.title),
                content.unwrap_or(current.content),
            )?;
            let outcome = session
                .run(Intent::UpdateNote { id: note_id, draft })
                .await;
            session.store.dispatch(Action::ClearCurrentNote);

            let state = outcome?;
            let updated = state
                .notes
                .iter()
                .find(|n| n.id == note_id)
                .context("Updated note missing from state")?;
            print_note(updated, client.json)
        }
        NotesCommand::Delete { note_id } => {
            session.run(Intent::DeleteNote(note_id)).await?;
            if client.json {
                print_json(&serde_json::json!({ "deleted": note_id }))
            } else {
                println!("Deleted note {note_id}");
                Ok(())
            }
        }
    }
}

pub async fn run_authors(client: ClientArgs, first_name: String) -> Result<()> {
    let session = Session::connect(&client)?;
    let result = session.run(Intent::SearchAuthors(first_name)).await;
    session.close().await;
    print_authors(&result?.search_data, client.json)
}

pub async fn run_version(client: ClientArgs) -> Result<()> {
    let api = HttpNotesApi::new(&client.server)?;
    let info = api.version().await?;
    if client.json {
        print_json(&info)
    } else {
        println!("{} ({})", info.version, info.environment);
        Ok(())
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

fn print_notes(notes: &[Note], json: bool) -> Result<()> {
    if json {
        return print_json(notes);
    }
    if notes.is_empty() {
        println!("No notes");
        return Ok(());
    }
    for note in notes {
        println!(
            "{}\t{}\t{}",
            note.id,
            note.title,
            preview(&note.content, PREVIEW_CHARS)
        );
    }
    Ok(())
}

fn print_note(note: &Note, json: bool) -> Result<()> {
    if json {
        return print_json(note);
    }
    println!("#{} {}", note.id, note.title);
    println!(
        "created {}  updated {}",
        note.created_at.to_rfc3339(),
        note.updated_at.to_rfc3339()
    );
    if !note.content.is_empty() {
        println!();
        println!("{}", note.content);
    }
    Ok(())
}

fn print_authors(authors: &[AuthorName], json: bool) -> Result<()> {
    if json {
        return print_json(authors);
    }
    if authors.is_empty() {
        println!("No authors found");
        return Ok(());
    }
    let width = authors
        .iter()
        .map(|a| a.first_name.chars().count())
        .max()
        .unwrap_or(0)
        .max("First Name".len());
    println!("{:<width$}  Last Name", "First Name");
    for author in authors {
        println!("{:<width$}  {}", author.first_name, author.last_name);
    }
    Ok(())
}
