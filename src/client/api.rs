// src/client/api.rs
//
// One HTTP call per operation. Non-2xx responses become `ClientError::Http`;
// nothing is retried or cached.

use async_trait::async_trait;
use reqwest::{Response, Url};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::constants::API_PREFIX;
use crate::domain::{AppInfo, AuthorName, Note, NoteDraft};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP Error {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Invalid server URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            ClientError::Network(e) => e.status().map(|s| s.as_u16()),
            ClientError::InvalidUrl { .. } => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

#[async_trait]
pub trait NotesApi: Send + Sync {
    async fn list_notes(&self) -> Result<Vec<Note>, ClientError>;
    async fn get_note(&self, id: i64) -> Result<Note, ClientError>;
    async fn create_note(&self, draft: &NoteDraft) -> Result<Note, ClientError>;
    async fn update_note(&self, id: i64, draft: &NoteDraft) -> Result<Note, ClientError>;
    /// Returns the server's confirmation message
    async fn delete_note(&self, id: i64) -> Result<String, ClientError>;
    async fn search_authors(&self, first_name: &str) -> Result<Vec<AuthorName>, ClientError>;
    async fn version(&self) -> Result<AppInfo, ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpNotesApi {
    base: Url,
    http: reqwest::Client,
}

impl HttpNotesApi {
    pub fn new(server_url: &str) -> Result<Self, ClientError> {
        let base = Url::parse(server_url).map_err(|e| ClientError::InvalidUrl {
            url: server_url.to_string(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl {
                url: server_url.to_string(),
                reason: "not a base URL".to_string(),
            });
        }
        Ok(Self {
            base,
            http: reqwest::Client::new(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}{}{}",
            self.base.as_str().trim_end_matches('/'),
            API_PREFIX,
            path
        )
    }

    /// Pass 2xx through; turn anything else into `Http` using the server's `{error}` text if any.
    async fn check_status(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown status")
                    .to_string()
            });
        warn!(status = status.as_u16(), %message, "Request failed");
        Err(ClientError::Http {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl NotesApi for HttpNotesApi {
    #[instrument(level = "debug", skip(self))]
    async fn list_notes(&self) -> Result<Vec<Note>, ClientError> {
        let response = self
            .http
            .get(self.url("/notes"))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let notes: Vec<Note> = Self::check_status(response).await?.json().await?;
        debug!(count = notes.len(), "Fetched notes");
        Ok(notes)
    }

    #[instrument(level = "debug", skip(self))]
    async fn get_note(&self, id: i64) -> Result<Note, ClientError> {
        let response = self.http.get(self.url(&format!("/notes/{id}"))).send().await?;
        Ok(Self::check_status(response).await?.json().await?)
    }

    #[instrument(level = "debug", skip(self, draft))]
    async fn create_note(&self, draft: &NoteDraft) -> Result<Note, ClientError> {
        let response = self.http.post(self.url("/notes")).json(draft).send().await?;
        Ok(Self::check_status(response).await?.json().await?)
    }

    #[instrument(level = "debug", skip(self, draft))]
    async fn update_note(&self, id: i64, draft: &NoteDraft) -> Result<Note, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("/notes/{id}")))
            .json(draft)
            .send()
            .await?;
        Ok(Self::check_status(response).await?.json().await?)
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete_note(&self, id: i64) -> Result<String, ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/notes/{id}")))
            .send()
            .await?;
        let body: MessageBody = Self::check_status(response).await?.json().await?;
        Ok(body.message)
    }

    #[instrument(level = "debug", skip(self))]
    async fn search_authors(&self, first_name: &str) -> Result<Vec<AuthorName>, ClientError> {
        let response = self
            .http
            .get(self.url("/authors"))
            .query(&[("firstName", first_name)])
            .send()
            .await?;
        Ok(Self::check_status(response).await?.json().await?)
    }

    async fn version(&self) -> Result<AppInfo, ClientError> {
        let response = self.http.get(self.url("/version")).send().await?;
        Ok(Self::check_status(response).await?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_base_with_trailing_slash_when_building_url_then_joins_once() {
        let api = HttpNotesApi::new("http://localhost:3001/").unwrap();

        assert_eq!(api.url("/notes/4"), "http://localhost:3001/api/notes/4");
    }

    #[test]
    fn given_garbage_url_when_creating_client_then_returns_invalid_url() {
        let result = HttpNotesApi::new("not a url");

        assert!(matches!(result, Err(ClientError::InvalidUrl { .. })));
    }

    #[test]
    fn given_http_error_when_reading_status_then_returns_code() {
        let err = ClientError::Http {
            status: 404,
            message: "Note not found".to_string(),
        };

        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "HTTP Error 404: Note not found");
    }
}
