//! CLI argument parsing for ebbnote
//!
//! Uses clap for argument parsing. Global flags: --config, --format, --quiet,
//! --verbose, --log-level, --log-json. Without a subcommand the interactive
//! shell starts.

pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use output::OutputFormat;

/// Ebbnote - spaced-repetition review reminders for a folder of notes
#[derive(Parser, Debug)]
#[command(name = "ebbnote")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (created with defaults if missing)
    #[arg(long, global = true, env = "EBBNOTE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. `info`, `ebbnote_core=trace`)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive shell (default)
    Shell,

    /// Create a new note and regenerate the exports
    New {
        /// Subject directory the note belongs to
        subject: String,

        /// Note title, used as the file name
        content: String,

        /// Open the new note in the editor
        #[arg(long)]
        open: bool,
    },

    /// Regenerate export.md and allExport.md
    Export {
        /// Open the due export in the editor afterwards
        #[arg(long)]
        open: bool,
    },

    /// Print the notes due for review today
    Due,

    /// Commit and push the store with git
    Push,

    /// Convert every note to HTML
    Html {
        /// Output directory (default: <export_dir>/html)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}
