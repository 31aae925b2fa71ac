// src/ports/http/error.rs
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::constants::{API_NOT_FOUND, INTERNAL_SERVER_ERROR, INVALID_NOTE_ID, NOTE_NOT_FOUND};
use crate::domain::DomainError;

/// Everything a handler can fail with, mapped to a status and a `{error}` body.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("note {0} not found")]
    NoteNotFound(i64),
    #[error("invalid note id: {0}")]
    InvalidId(String),
    #[error("no API route for {0}")]
    RouteNotFound(String),
    /// Detail is logged, never sent
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(message) => ApiError::BadRequest(message),
            DomainError::NoteNotFound(id) => ApiError::NoteNotFound(id),
            DomainError::Storage(detail) => ApiError::Internal(detail),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::NoteNotFound(_) | ApiError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> &str {
        match self {
            ApiError::BadRequest(message) => message,
            ApiError::NoteNotFound(_) => NOTE_NOT_FOUND,
            ApiError::InvalidId(_) => INVALID_NOTE_ID,
            ApiError::RouteNotFound(_) => API_NOT_FOUND,
            ApiError::Internal(_) => INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(detail) => error!(%detail, "Request failed"),
            other => warn!(error = %other, "Request rejected"),
        }
        let body = Json(json!({ "error": self.client_message() }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_domain_errors_when_converting_then_maps_to_expected_status() {
        let cases = [
            (DomainError::Validation("Title is required".into()), StatusCode::BAD_REQUEST),
            (DomainError::NoteNotFound(7), StatusCode::NOT_FOUND),
            (DomainError::Storage("disk I/O error".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (domain, expected) in cases {
            assert_eq!(ApiError::from(domain).status(), expected);
        }
    }

    #[test]
    fn given_storage_error_when_building_message_then_hides_driver_detail() {
        let err = ApiError::from(DomainError::Storage("no such table: notes".into()));

        assert_eq!(err.client_message(), "Internal Server Error");
    }
}
