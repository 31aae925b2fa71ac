// src/domain/app_info.rs
use serde::{Deserialize, Serialize};

/// Body of `GET /api/version`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    pub version: String,
    pub environment: String,
}
