// src/infrastructure/sqlite/pool.rs
//
// r2d2 pool over SQLite in WAL mode: readers proceed concurrently, writers are
// serialized by SQLite itself. Handlers take one connection per query.

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use super::migrations;
use crate::infrastructure::config::DatabaseConfig;
use crate::infrastructure::{DatabaseError, DatabaseResult};

#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub max_size: u32,
    pub min_idle: Option<u32>,
    pub connection_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_size: 10,
            min_idle: Some(2),
            connection_timeout: Duration::from_secs(30),
        }
    }
}

impl From<&DatabaseConfig> for PoolConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            max_size: config.max_connections,
            min_idle: Some(config.min_idle.min(config.max_connections)),
            connection_timeout: config.connection_timeout(),
        }
    }
}

/// Name of the SQL function that lowercases with full Unicode rules.
/// The built-in `lower()` and `LIKE` only fold ASCII letters.
pub const UNICODE_LOWER: &str = "unicode_lower";

fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        UNICODE_LOWER,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: String = ctx.get(0)?;
            Ok(value.to_lowercase())
        },
    )
}

/// Cloning is cheap: clones share the same underlying pool.
#[derive(Clone)]
pub struct DatabasePool {
    pool: Pool<SqliteConnectionManager>,
    path: PathBuf,
}

impl DatabasePool {
    /// Open (creating if needed) the database file, apply pragmas and run pending migrations.
    pub fn open(path: &Path, config: PoolConfig) -> DatabaseResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let manager = SqliteConnectionManager::file(path).with_init(|conn| {
            conn.execute_batch(
                "
                PRAGMA busy_timeout = 5000;
                PRAGMA journal_mode = WAL;
                PRAGMA synchronous = NORMAL;
                PRAGMA foreign_keys = ON;
            ",
            )?;
            register_functions(conn)
        });

        let pool = Pool::builder()
            .max_size(config.max_size)
            .min_idle(config.min_idle)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .map_err(|e| DatabaseError::Connection(e.to_string()))?;

        info!(path = %path.display(), max_size = config.max_size, "Database pool created");

        {
            let conn = pool
                .get()
                .map_err(|e| DatabaseError::Connection(e.to_string()))?;
            migrations::run_migrations(&conn)?;
        }

        Ok(Self {
            pool,
            path: path.to_path_buf(),
        })
    }

    /// Blocks until a connection is free or the pool timeout elapses.
    /// The connection goes back to the pool on drop.
    pub fn get(&self) -> DatabaseResult<PooledConnection<SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| DatabaseError::Connection(e.to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn health_check(&self) -> DatabaseResult<()> {
        let conn = self.get()?;
        conn.execute_batch("SELECT 1")?;
        debug!("Database pool health check passed");
        Ok(())
    }
}
