// Rust guideline compliant 2026-10-18

//! Implementation of the `trackshift convert` command.
//!
//! Loads each project's issues from cache (downloading when needed) and
//! writes the importer CSV. Projects run in isolation: a failure is reported
//! and the run moves on to the next project.

use crate::commands::{project_names, RunOutcome};
use crate::output::conversion_table;
use crate::terminal::Console;
use anyhow::{Context, Result};
use std::fmt;
use tracing::error;
use trackshift_core::{convert_project, Config, ConversionReport, Storage};
use trackshift_fetch::{load_or_download, IssueSource};

/// Where the converted issues were read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The cached issues file.
    Cache,
    /// A fresh download.
    Api,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Cache => write!(f, "cache"),
            Source::Api => write!(f, "api"),
        }
    }
}

/// One successfully converted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConversion {
    /// Conversion report.
    pub report: ConversionReport,
    /// Where the issues came from.
    pub source: Source,
}

/// Converts a single project.
///
/// # Errors
///
/// Returns an error if the issues cannot be loaded or conversion fails.
pub fn convert_one(config: &Config) -> Result<ProjectConversion> {
    let (raw, source) = load_or_download(config)
        .with_context(|| format!("failed to load issues for {}", config.project_name))?;
    let storage = Storage::from_config(config)?;
    let report = convert_project(raw, &storage, config)
        .with_context(|| format!("failed to convert {}", config.project_name))?;
    let source = match source {
        IssueSource::Cache => Source::Cache,
        IssueSource::Api(_) => Source::Api,
    };
    Ok(ProjectConversion { report, source })
}

/// Executes the convert command.
///
/// # Arguments
///
/// * `config` - Loaded configuration
/// * `projects` - Projects named on the command line; empty means the configured one
/// * `console` - Status printer
///
/// # Returns
///
/// The successful conversions and the names of failed projects.
///
/// # Errors
///
/// Returns an error only if no project can be determined.
pub fn execute(
    config: &Config,
    projects: &[String],
    console: &Console,
) -> Result<RunOutcome<ProjectConversion>> {
    let mut outcome = RunOutcome::default();

    for project in project_names(config, projects)? {
        console.start(&format!("Converting {}...", project));
        let project_config = config.for_project(&project);
        match convert_one(&project_config) {
            Ok(conversion) => {
                console.success(&format!(
                    "Conversion complete: {}",
                    conversion.report.output_path.display()
                ));
                outcome.succeeded.push(conversion);
            }
            Err(e) => {
                error!(project = %project, error = %format!("{:#}", e), "conversion failed");
                console.error(&format!("Failed to convert project {}: {:#}", project, e));
                outcome.failed.push(project);
            }
        }
    }

    println!("{}", conversion_table(&outcome.succeeded));
    Ok(outcome)
}
