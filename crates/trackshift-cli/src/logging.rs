// Rust guideline compliant 2026-10-18

//! Tracing subscriber setup.
//!
//! Logs go to stderr in the compact text format, or as JSON lines to a file
//! when `--log-file` is given.

use anyhow::{bail, Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;

/// Parses a log level name.
///
/// # Errors
///
/// Returns an error for anything other than error, warn, info or debug.
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "error" => Ok(Level::ERROR),
        "warn" => Ok(Level::WARN),
        "info" => Ok(Level::INFO),
        "debug" => Ok(Level::DEBUG),
        other => bail!("invalid log level '{}', expected error, warn, info or debug", other),
    }
}

/// Installs the global tracing subscriber.
///
/// # Arguments
///
/// * `level` - Maximum level name
/// * `log_file` - Optional file to append JSON log lines to
///
/// # Returns
///
/// The appender guard when logging to a file; it must be held until exit so
/// buffered lines are flushed.
///
/// # Errors
///
/// Returns an error if the level is invalid or the log file cannot be opened.
pub fn init_logging(level: &str, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = parse_log_level(level)?;

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        let (writer, guard) = tracing_appender::non_blocking(file);
        let subscriber = fmt()
            .with_max_level(level)
            .with_target(false)
            .json()
            .with_writer(writer)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
        return Ok(Some(guard));
    }

    let subscriber = fmt()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
    Ok(None)
}
