// src/client/actions.rs
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::domain::{AuthorName, Note, NoteDraft};

/// Result actions: the only inputs of the reducer.
///
/// Wire shape is `{"type": "SET_NOTES", "payload": [...]}`. A type this client does not
/// know decodes to `Unknown` whatever its payload, and the reducer ignores it. A known
/// type with a payload of the wrong shape is a decode error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    SetNotes(Vec<Note>),
    AddNote(Note),
    UpdateNote(Note),
    RemoveNote(i64),
    SetCurrentNote(Note),
    ClearCurrentNote,
    SetSearchData(Vec<AuthorName>),
    Unknown,
}

impl Action {
    pub fn type_name(&self) -> &'static str {
        match self {
            Action::SetNotes(_) => "SET_NOTES",
            Action::AddNote(_) => "ADD_NOTE",
            Action::UpdateNote(_) => "UPDATE_NOTE",
            Action::RemoveNote(_) => "REMOVE_NOTE",
            Action::SetCurrentNote(_) => "SET_CURRENT_NOTE",
            Action::ClearCurrentNote => "CLEAR_CURRENT_NOTE",
            Action::SetSearchData(_) => "SET_SEARCH_DATA",
            Action::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Deserialize)]
struct RawAction {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Value,
}

impl TryFrom<RawAction> for Action {
    type Error = serde_json::Error;

    fn try_from(raw: RawAction) -> Result<Self, Self::Error> {
        let payload = raw.payload;
        let action = match raw.kind.as_str() {
            "SET_NOTES" => Action::SetNotes(serde_json::from_value(payload)?),
            "ADD_NOTE" => Action::AddNote(serde_json::from_value(payload)?),
            "UPDATE_NOTE" => Action::UpdateNote(serde_json::from_value(payload)?),
            "REMOVE_NOTE" => Action::RemoveNote(serde_json::from_value(payload)?),
            "SET_CURRENT_NOTE" => Action::SetCurrentNote(serde_json::from_value(payload)?),
            "CLEAR_CURRENT_NOTE" => Action::ClearCurrentNote,
            "SET_SEARCH_DATA" => Action::SetSearchData(serde_json::from_value(payload)?),
            _ => Action::Unknown,
        };
        Ok(action)
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawAction::deserialize(deserializer)?;
        Action::try_from(raw).map_err(de::Error::custom)
    }
}

/// Intent actions: requests for an effect, handled by the coordinator and never by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    FetchNotes,
    CreateNote(NoteDraft),
    UpdateNote { id: i64, draft: NoteDraft },
    DeleteNote(i64),
    SearchAuthors(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentKind {
    Fetch,
    Create,
    Update,
    Delete,
    SearchAuthors,
}

impl IntentKind {
    pub const ALL: [IntentKind; 5] = [
        IntentKind::Fetch,
        IntentKind::Create,
        IntentKind::Update,
        IntentKind::Delete,
        IntentKind::SearchAuthors,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IntentKind::Fetch => "fetch",
            IntentKind::Create => "create",
            IntentKind::Update => "update",
            IntentKind::Delete => "delete",
            IntentKind::SearchAuthors => "search",
        }
    }
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Intent {
    pub fn kind(&self) -> IntentKind {
        match self {
            Intent::FetchNotes => IntentKind::Fetch,
            Intent::CreateNote(_) => IntentKind::Create,
            Intent::UpdateNote { .. } => IntentKind::Update,
            Intent::DeleteNote(_) => IntentKind::Delete,
            Intent::SearchAuthors(_) => IntentKind::SearchAuthors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn given_remove_action_when_serializing_then_uses_type_and_payload() {
        let json = serde_json::to_value(Action::RemoveNote(3)).unwrap();

        assert_eq!(json, json!({"type": "REMOVE_NOTE", "payload": 3}));
    }

    #[test]
    fn given_clear_action_when_serializing_then_has_no_payload() {
        let json = serde_json::to_value(Action::ClearCurrentNote).unwrap();

        assert_eq!(json, json!({"type": "CLEAR_CURRENT_NOTE"}));
    }

    #[test]
    fn given_unrecognized_type_when_deserializing_then_returns_unknown() {
        let action: Action = serde_json::from_value(json!({"type": "@@INIT"})).unwrap();

        assert_eq!(action, Action::Unknown);
    }

    #[test]
    fn given_unrecognized_type_with_payload_when_deserializing_then_returns_unknown() {
        let action: Action =
            serde_json::from_value(json!({"type": "UNKNOWN", "payload": {"a": 1}})).unwrap();

        assert_eq!(action, Action::Unknown);
    }

    #[test]
    fn given_clear_action_with_stray_payload_when_deserializing_then_ignores_it() {
        let action: Action =
            serde_json::from_value(json!({"type": "CLEAR_CURRENT_NOTE", "payload": 5})).unwrap();

        assert_eq!(action, Action::ClearCurrentNote);
    }

    #[test]
    fn given_known_type_without_payload_when_deserializing_then_fails() {
        let result = serde_json::from_value::<Action>(json!({"type": "REMOVE_NOTE"}));

        assert!(result.is_err());
    }

    #[test]
    fn given_serialized_action_when_deserializing_then_round_trips() {
        let action = Action::RemoveNote(42);

        let decoded: Action = serde_json::from_value(serde_json::to_value(&action).unwrap()).unwrap();

        assert_eq!(decoded, action);
    }

    #[test]
    fn given_intents_when_classifying_then_each_maps_to_its_queue() {
        let draft = NoteDraft::new("t", "c").unwrap();

        assert_eq!(Intent::FetchNotes.kind(), IntentKind::Fetch);
        assert_eq!(Intent::CreateNote(draft.clone()).kind(), IntentKind::Create);
        assert_eq!(Intent::UpdateNote { id: 1, draft }.kind(), IntentKind::Update);
        assert_eq!(Intent::DeleteNote(1).kind(), IntentKind::Delete);
        assert_eq!(
            Intent::SearchAuthors("*".into()).kind(),
            IntentKind::SearchAuthors
        );
    }
}
