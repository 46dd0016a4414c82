// Rust guideline compliant 2026-10-18

//! Implementation of the `trackshift download` command.
//!
//! Downloads each project from the API and refreshes its cache files,
//! regardless of `prefer_api`.

use crate::commands::{project_names, RunOutcome};
use crate::output::download_table;
use crate::terminal::Console;
use anyhow::Result;
use tracing::error;
use trackshift_core::Config;
use trackshift_fetch::{refresh_cache, DownloadReport};

/// Executes the download command.
///
/// # Arguments
///
/// * `config` - Loaded configuration
/// * `projects` - Projects named on the command line; empty means the configured one
/// * `console` - Status printer
///
/// # Returns
///
/// The successful downloads and the names of failed projects.
///
/// # Errors
///
/// Returns an error only if no project can be determined.
pub fn execute(
    config: &Config,
    projects: &[String],
    console: &Console,
) -> Result<RunOutcome<DownloadReport>> {
    let mut outcome = RunOutcome::default();

    for project in project_names(config, projects)? {
        console.start(&format!("Downloading {}...", project));
        match refresh_cache(&config.for_project(&project)) {
            Ok(report) => {
                if report.attachments_failed > 0 {
                    console.warning(&format!(
                        "{} attachment(s) failed to download for {}",
                        report.attachments_failed, project
                    ));
                }
                console.success(&format!("Downloaded {} issues for {}", report.issues, project));
                outcome.succeeded.push(report);
            }
            Err(e) => {
                error!(project = %project, error = %e, "download failed");
                console.error(&format!("Failed to download project {}: {}", project, e));
                outcome.failed.push(project);
            }
        }
    }

    println!("{}", download_table(&outcome.succeeded));
    Ok(outcome)
}
