// src/domain/note.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::TITLE_REQUIRED;
use crate::domain::DomainError;

/// A persisted note. `id` and both timestamps are assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for create and update, exactly as the client sent it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Title and content that passed validation and may reach storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Result<Self, DomainError> {
        NoteInput {
            title: Some(title.into()),
            content: Some(content.into()),
        }
        .validate()
    }
}

impl NoteInput {
    /// A blank or missing title is rejected; missing content becomes empty.
    pub fn validate(self) -> Result<NoteDraft, DomainError> {
        let title = match self.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => return Err(DomainError::Validation(TITLE_REQUIRED.to_string())),
        };

        Ok(NoteDraft {
            title,
            content: self.content.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_title_and_content_when_validating_then_keeps_both() {
        let input = NoteInput {
            title: Some("Groceries".to_string()),
            content: Some("milk".to_string()),
        };

        let draft = input.validate().expect("Input should be valid");

        assert_eq!(draft.title, "Groceries");
        assert_eq!(draft.content, "milk");
    }

    #[test]
    fn given_missing_content_when_validating_then_defaults_to_empty() {
        let input = NoteInput {
            title: Some("Only a title".to_string()),
            content: None,
        };

        let draft = input.validate().expect("Input should be valid");

        assert_eq!(draft.content, "");
    }

    #[test]
    fn given_missing_title_when_validating_then_returns_validation_error() {
        let input = NoteInput {
            title: None,
            content: Some("no title".to_string()),
        };

        let result = input.validate();

        assert_eq!(
            result,
            Err(DomainError::Validation("Title is required".to_string()))
        );
    }

    #[test]
    fn given_blank_title_when_validating_then_returns_validation_error() {
        let result = NoteDraft::new("   ", "content");

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn given_json_body_without_title_when_deserializing_then_title_is_none() {
        let input: NoteInput =
            serde_json::from_str(r#"{"content":"no title"}"#).expect("Body should parse");

        assert!(input.title.is_none());
        assert_eq!(input.content.as_deref(), Some("no title"));
    }
}
