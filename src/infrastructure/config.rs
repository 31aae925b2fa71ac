// src/infrastructure/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::constants::DEFAULT_PORT;

/// TOML configuration for the notes server
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub app: AppConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_idle")]
    pub min_idle: u32,
    #[serde(default = "default_connection_timeout_secs")]
    pub connection_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_environment")]
    pub environment: String,
    /// Overrides the crate version reported by `/api/version`
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default = "default_seed_sample_data")]
    pub seed_sample_data: bool,
}

// Default value functions
fn default_bind() -> String { format!("0.0.0.0:{DEFAULT_PORT}") }
fn default_static_dir() -> PathBuf { PathBuf::from("static") }
fn default_max_connections() -> u32 { 10 }
fn default_min_idle() -> u32 { 2 }
fn default_connection_timeout_secs() -> u64 { 30 }
fn default_environment() -> String { "development".to_string() }
fn default_seed_sample_data() -> bool { true }

fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("notesapp")
        .join("notes.db")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
            min_idle: default_min_idle(),
            connection_timeout_secs: default_connection_timeout_secs(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            version: None,
            seed_sample_data: default_seed_sample_data(),
        }
    }
}

impl DatabaseConfig {
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout_secs)
    }
}

impl AppConfig {
    pub fn version(&self) -> String {
        self.version
            .clone()
            .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string())
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// File config (or defaults when no path is given) with environment overrides applied
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply `NOTES_*`, `PORT`, `DATABASE_PATH` and `STATIC_DIR` overrides.
    /// `NOTES_BIND` wins over `PORT` when both are set.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(environment) = lookup("NOTES_ENV") {
            self.app.environment = environment;
        }
        if let Some(version) = lookup("NOTES_VERSION") {
            self.app.version = Some(version);
        }
        if let Some(port) = lookup("PORT") {
            self.server.bind = format!("0.0.0.0:{port}");
        }
        if let Some(bind) = lookup("NOTES_BIND") {
            self.server.bind = bind;
        }
        if let Some(path) = lookup("DATABASE_PATH") {
            self.database.path = PathBuf::from(path);
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            self.server.static_dir = PathBuf::from(dir);
        }
        debug!(config = ?self, "Configuration after environment overrides");
    }
}
