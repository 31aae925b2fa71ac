use anyhow::{Context, Result};
use axum::Router;
use notesapp::domain::AppInfo;
use notesapp::infrastructure::sqlite::seed_sample_data;
use notesapp::infrastructure::{
    DatabasePool, PoolConfig, SqliteAuthorRepository, SqliteNoteRepository,
};
use notesapp::ports::http::{router, AppContext};
use notesapp::ports::AppShell;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::task::JoinHandle;

/// Temporary SQLite database, migrated and optionally seeded
#[allow(dead_code)]
pub struct TestDatabase {
    _temp_dir: TempDir,
    pub path: PathBuf,
    pub pool: DatabasePool,
}

#[allow(dead_code)]
impl TestDatabase {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let path = temp_dir.path().join("notes.db");
        let pool = DatabasePool::open(&path, PoolConfig::default())
            .context("Failed to open test database")?;
        Ok(Self {
            _temp_dir: temp_dir,
            path,
            pool,
        })
    }

    pub fn seeded() -> Result<Self> {
        let db = Self::new()?;
        seed_sample_data(&db.pool).context("Failed to seed test database")?;
        Ok(db)
    }

    pub fn notes(&self) -> SqliteNoteRepository {
        SqliteNoteRepository::new(self.pool.clone())
    }

    pub fn authors(&self) -> SqliteAuthorRepository {
        SqliteAuthorRepository::new(self.pool.clone())
    }

    /// Full router over this database; the app shell is the built-in page
    pub fn router(&self) -> Router {
        let info = test_info();
        let shell = AppShell::load(self.path.with_file_name("no-static-dir"), &info);
        let ctx = AppContext::new(Arc::new(self.notes()), Arc::new(self.authors()), info);
        router(ctx, shell)
    }
}

#[allow(dead_code)]
pub fn test_info() -> AppInfo {
    AppInfo {
        version: "1.0.0-test".to_string(),
        environment: "test".to_string(),
    }
}

/// Serve `app` on an ephemeral local port; the server lives until the handle is aborted
#[allow(dead_code)]
pub async fn spawn_server(app: Router) -> Result<(String, JoinHandle<()>)> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("Failed to bind test listener")?;
    let addr: SocketAddr = listener.local_addr()?;
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });
    Ok((format!("http://{addr}"), handle))
}
