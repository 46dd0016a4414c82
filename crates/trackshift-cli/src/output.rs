// Rust guideline compliant 2026-10-18

//! Summary tables printed after a run.

use crate::commands::convert::ProjectConversion;
use tabled::{builder::Builder, settings::Style};
use trackshift_fetch::DownloadReport;

/// Formats the per-project conversion summary.
///
/// # Arguments
/// * `conversions` - Successful conversions in run order
///
/// # Returns
/// A table with one row per project, or a short notice when empty
pub fn conversion_table(conversions: &[ProjectConversion]) -> String {
    if conversions.is_empty() {
        return "No projects converted.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(vec![
        "Project", "Source", "Issues", "Deleted", "Links", "Rows", "Columns", "Output",
    ]);
    for conversion in conversions {
        let stats = &conversion.report.stats;
        builder.push_record(vec![
            conversion.report.project.clone(),
            conversion.source.to_string(),
            stats.issues_read.to_string(),
            stats.issues_deleted.to_string(),
            stats.links_removed.to_string(),
            stats.rows.to_string(),
            stats.columns.to_string(),
            conversion.report.output_path.display().to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern());
    table.to_string()
}

/// Formats the per-project download summary.
///
/// # Arguments
/// * `reports` - Successful downloads in run order
///
/// # Returns
/// A table with one row per project, or a short notice when empty
pub fn download_table(reports: &[DownloadReport]) -> String {
    if reports.is_empty() {
        return "No projects downloaded.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(vec![
        "Project", "Issues", "Work items", "Boards", "Attachments", "Failed",
    ]);
    for report in reports {
        builder.push_record(vec![
            report.project.clone(),
            report.issues.to_string(),
            report.work_items.to_string(),
            report.boards.to_string(),
            report.attachments_saved.to_string(),
            report.attachments_failed.to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern());
    table.to_string()
}
