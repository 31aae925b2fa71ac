// src/client/reducer.rs
use serde::Serialize;

use super::Action;
use crate::domain::{AuthorName, Note};

/// Client-side cache of server state. Possibly stale; refreshed by explicit re-fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    /// Display order as served: most recently updated first
    pub notes: Vec<Note>,
    /// Note open for editing
    pub current_note: Option<Note>,
    pub search_data: Vec<AuthorName>,
}

/// Pure and total: unknown actions return the state untouched.
pub fn reduce(state: State, action: Action) -> State {
    match action {
        Action::SetNotes(notes) => State { notes, ..state },
        Action::AddNote(note) => {
            let mut notes = Vec::with_capacity(state.notes.len() + 1);
            notes.push(note);
            notes.extend(state.notes);
            State { notes, ..state }
        }
        Action::UpdateNote(updated) => State {
            notes: state
                .notes
                .into_iter()
                .map(|note| if note.id == updated.id { updated.clone() } else { note })
                .collect(),
            ..state
        },
        Action::RemoveNote(id) => State {
            notes: state.notes.into_iter().filter(|note| note.id != id).collect(),
            ..state
        },
        Action::SetCurrentNote(note) => State {
            current_note: Some(note),
            ..state
        },
        Action::ClearCurrentNote => State {
            current_note: None,
            ..state
        },
        Action::SetSearchData(search_data) => State {
            search_data,
            ..state
        },
        Action::Unknown => state,
    }
}
