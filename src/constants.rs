// src/constants.rs
//
// Application-wide constants: user-facing messages, route layout and defaults.
// The error strings are part of the HTTP contract and are asserted by clients.

/// Prefix under which every JSON route is mounted.
///
/// Anything below this prefix that no route claims gets a JSON 404 instead of the app shell.
pub const API_PREFIX: &str = "/api";

pub const TITLE_REQUIRED: &str = "Title is required";
pub const NOTE_NOT_FOUND: &str = "Note not found";
pub const NOTE_DELETED: &str = "Note deleted successfully";
pub const API_NOT_FOUND: &str = "API endpoint not found";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";
pub const INVALID_NOTE_ID: &str = "Invalid note id";
pub const MISSING_SEARCH_PARAMS: &str = "Missing required parameters";

/// Search term that selects every author instead of a prefix match.
pub const SEARCH_ALL: &str = "*";

/// Port used when neither the config file nor `PORT` sets one.
pub const DEFAULT_PORT: u16 = 3001;

/// Server URL the CLI client talks to unless `--server` says otherwise.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3001";

