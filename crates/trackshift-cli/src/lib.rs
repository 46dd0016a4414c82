// Rust guideline compliant 2026-10-18

//! Trackshift CLI library.
//!
//! This library exposes the command-line definition and command modules for
//! use by the binary and in tests.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;
pub mod logging;
pub mod output;
pub mod terminal;

pub use terminal::{should_use_color, Console};

#[derive(Parser, Debug)]
#[command(
    name = "trackshift",
    version,
    about = "Trackshift: move YouTrack projects into the Jira CSV importer",
    long_about = "Trackshift downloads YouTrack issues, worklogs, sprints and attachments, rewrites them with the Jira hierarchy rules and writes one importer CSV per project.",
    after_help = "Examples:\n  trackshift convert\n  trackshift convert PLAT OPS\n  trackshift --config prod.toml download PLAT\n  trackshift --log-level debug --log-file run.log convert PLAT\n"
)]
pub struct Cli {
    /// Configuration file path
    #[arg(long, global = true, default_value = trackshift_core::config::CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Log level (error, warn, info, debug)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Append JSON logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert projects to Jira importer CSV, downloading when not cached
    Convert {
        /// Project short names; defaults to the configured project
        projects: Vec<String>,
    },

    /// Download projects from YouTrack and refresh their cache files
    Download {
        /// Project short names; defaults to the configured project
        projects: Vec<String>,
    },
}
