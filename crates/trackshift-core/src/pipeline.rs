// Rust guideline compliant 2026-10-18

//! End-to-end conversion of one project's raw issues into importer CSV.

use crate::builtin::builtin_registry;
use crate::flatten::{flatten, write_csv_file, FlatTable};
use crate::normalize::normalize_all;
use crate::relations::{dedupe_symmetric_links, RELATES_TO};
use crate::rules::{apply_rules_to_set, RuleRegistry};
use crate::{Config, RawIssueSet, Result, Storage};
use std::path::PathBuf;
use tracing::info;

/// Counts collected while converting one project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Raw issues read.
    pub issues_read: usize,
    /// Mirrored symmetric links removed.
    pub links_removed: usize,
    /// Issues dropped by the deletion rule.
    pub issues_deleted: usize,
    /// Data rows in the output table.
    pub rows: usize,
    /// Columns in the output table.
    pub columns: usize,
}

/// Result of converting one project to a CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    /// Project short name.
    pub project: String,
    /// Conversion counts.
    pub stats: ConversionStats,
    /// Written CSV file.
    pub output_path: PathBuf,
}

/// Converts raw issues into a flat table using an explicit registry.
///
/// Stages run in order: normalize, symmetric link fix-up, rules, flatten.
///
/// # Arguments
///
/// * `raw` - Raw source issues in source order
/// * `registry` - Rules to apply
/// * `config` - Conversion settings
///
/// # Returns
///
/// The flattened table and conversion counts.
///
/// # Errors
///
/// Returns the first normalization or rule error.
pub fn convert_with_registry(
    raw: RawIssueSet,
    registry: &RuleRegistry,
    config: &Config,
) -> Result<(FlatTable, ConversionStats)> {
    let issues_read = raw.len();

    info!(count = issues_read, "unpacking issues");
    let mut issues = normalize_all(raw, config.timezone)?;

    let links_removed = dedupe_symmetric_links(&mut issues, RELATES_TO);
    info!(removed = links_removed, "deduplicated symmetric links");

    info!(rules = registry.len(), "applying field rules");
    let processed = apply_rules_to_set(&issues, registry)?;
    let issues_deleted = issues.len() - processed.len();

    info!(count = processed.len(), "flattening issues");
    let table = flatten(&processed);

    let stats = ConversionStats {
        issues_read,
        links_removed,
        issues_deleted,
        rows: table.row_count(),
        columns: table.column_count(),
    };
    Ok((table, stats))
}

/// Converts raw issues with the configured built-in rules.
///
/// # Errors
///
/// Returns an error if the rule selection is invalid or conversion fails.
pub fn convert_issues(raw: RawIssueSet, config: &Config) -> Result<(FlatTable, ConversionStats)> {
    let registry = builtin_registry(&config.rules)?;
    convert_with_registry(raw, &registry, config)
}

/// Converts raw issues and writes the project's CSV file.
///
/// # Arguments
///
/// * `raw` - Raw source issues
/// * `storage` - The project's file layout
/// * `config` - Conversion settings
///
/// # Returns
///
/// A report naming the written file.
///
/// # Errors
///
/// Returns an error if conversion fails or the CSV cannot be written.
pub fn convert_project(raw: RawIssueSet, storage: &Storage, config: &Config) -> Result<ConversionReport> {
    let (table, stats) = convert_issues(raw, config)?;

    storage.ensure_dirs()?;
    let output_path = storage.csv_path();
    write_csv_file(&table, &output_path)?;
    info!(path = %output_path.display(), rows = stats.rows, "wrote CSV");

    Ok(ConversionReport {
        project: storage.project().to_string(),
        stats,
        output_path,
    })
}
