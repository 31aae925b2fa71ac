// src/domain/author.rs
use serde::{Deserialize, Serialize};

/// Projection returned by the author search: only the name columns leave the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorName {
    pub first_name: String,
    pub last_name: String,
}
