// src/lib.rs
pub mod application;
pub mod cli;
pub mod client;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::cli::args::{Args, Command};
use crate::infrastructure::Config;

pub async fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting notesapp with arguments");

    match args.command {
        Command::Serve {
            config,
            bind,
            database,
        } => {
            let config = server_config(config, bind, database)?;
            ports::http::serve(config).await
        }
        Command::Notes { client, command } => cli::commands::run_notes(client, command).await,
        Command::Authors { client, first_name } => {
            cli::commands::run_authors(client, first_name).await
        }
        Command::Version { client } => cli::commands::run_version(client).await,
        Command::InitConfig { path } => {
            if path.exists() {
                anyhow::bail!("Refusing to overwrite existing file {}", path.display());
            }
            Config::default()
                .save(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Wrote default config");
            println!("Wrote {}", path.display());
            Ok(())
        }
    }
}

/// File, then environment, then command line: later sources win.
pub fn server_config(
    path: Option<PathBuf>,
    bind: Option<String>,
    database: Option<PathBuf>,
) -> Result<Config> {
    let mut config = Config::resolve(path.as_deref())?;
    if let Some(bind) = bind {
        config.server.bind = bind;
    }
    if let Some(database) = database {
        config.database.path = database;
    }
    debug!(?config, "Resolved server configuration");
    Ok(config)
}
