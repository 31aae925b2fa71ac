// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::constants::DEFAULT_SERVER_URL;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP server
    Serve {
        /// Path to TOML config file (optional)
        #[arg(short, long, value_name = "CONFIG", env = "NOTES_CONFIG")]
        config: Option<PathBuf>,

        /// Listen address, overrides config and environment
        #[arg(short, long, value_name = "ADDR")]
        bind: Option<String>,

        /// SQLite database file, overrides config and environment
        #[arg(short, long, value_name = "PATH")]
        database: Option<PathBuf>,
    },

    /// Work with notes on a running server
    Notes {
        #[command(flatten)]
        client: ClientArgs,

        #[command(subcommand)]
        command: NotesCommand,
    },

    /// Search the authors table on a running server
    Authors {
        #[command(flatten)]
        client: ClientArgs,

        /// Start of the first name; `*` lists everyone
        #[arg(value_name = "FIRST_NAME", default_value = "*")]
        first_name: String,
    },

    /// Print the server's version and environment
    Version {
        #[command(flatten)]
        client: ClientArgs,
    },

    /// Write a config file with all defaults
    InitConfig {
        /// Destination path
        #[arg(value_name = "PATH", default_value = "notesapp.toml")]
        path: PathBuf,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct ClientArgs {
    /// Base URL of the notes server
    #[arg(short, long, value_name = "URL", env = "NOTES_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server: String,

    /// Output JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum NotesCommand {
    /// List notes with ID, title and first line of content
    List,

    /// Show a single note
    Show {
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,
    },

    /// Create a note
    Create {
        #[arg(short, long)]
        title: String,

        #[arg(short, long, default_value = "")]
        content: String,
    },

    /// Change title and/or content of a note
    Update {
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        content: Option<String>,
    },

    /// Delete a note
    Delete {
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,
    },
}
