// src/ports/shell.rs
use html_escape::encode_text;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::domain::AppInfo;

/// The single-page app shell returned for every non-API path the static directory
/// cannot serve, so client-side routes survive a reload.
#[derive(Debug, Clone)]
pub struct AppShell {
    static_dir: PathBuf,
    html: String,
}

impl AppShell {
    /// Use `<static_dir>/index.html` when present, otherwise the built-in page.
    pub fn load(static_dir: impl AsRef<Path>, info: &AppInfo) -> Self {
        let static_dir = static_dir.as_ref().to_path_buf();
        let index = static_dir.join("index.html");

        let html = match std::fs::read_to_string(&index) {
            Ok(html) => {
                info!(path = %index.display(), "Serving app shell from static directory");
                html
            }
            Err(e) => {
                warn!(path = %index.display(), error = %e, "No app shell found, using built-in page");
                Self::render_default(info)
            }
        };

        Self { static_dir, html }
    }

    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn render_default(info: &AppInfo) -> String {
        debug!(?info, "Rendering built-in app shell");
        let version = encode_text(&info.version);
        let environment = encode_text(&info.environment);

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Notes</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            max-width: 800px;
            margin: 2rem auto;
            padding: 0 1rem;
            color: #333;
        }}
        footer {{
            margin-top: 3rem;
            font-size: 0.8rem;
            color: #888;
        }}
    </style>
</head>
<body>
    <div id="root">
        <h1>Notes</h1>
        <p>The client bundle is not installed. The JSON API is available under <code>/api</code>.</p>
    </div>
    <footer>notesapp {version} ({environment})</footer>
</body>
</html>"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> AppInfo {
        AppInfo {
            version: "1.0.0".to_string(),
            environment: "<script>".to_string(),
        }
    }

    #[test]
    fn given_missing_static_dir_when_loading_then_uses_builtin_shell() {
        let temp_dir = tempfile::tempdir().unwrap();

        let shell = AppShell::load(temp_dir.path().join("absent"), &info());

        assert!(shell.html().contains(r#"<div id="root">"#));
    }

    #[test]
    fn given_index_html_when_loading_then_serves_file_content() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("index.html"), "<html>custom</html>").unwrap();

        let shell = AppShell::load(temp_dir.path(), &info());

        assert_eq!(shell.html(), "<html>custom</html>");
    }

    #[test]
    fn given_markup_in_environment_when_rendering_then_escapes_it() {
        let html = AppShell::render_default(&info());

        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("(<script>)"));
    }
}
