// Rust guideline compliant 2026-10-18

//! Tabular flattening and CSV output.
//!
//! Each field becomes one or more `name:i` columns, as wide as the longest
//! list found in that field across all issues. Headers lose their `:i`
//! suffix when written, so repeated headers (`comments`, `comments`) are how
//! the importer receives multi-valued fields.

use crate::naming::{indexed_column, strip_column_suffix};
use crate::{FieldValue, Issue, Result};
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

/// Flattened issues: suffixed column names and one row of cells per issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl FlatTable {
    /// Returns the suffixed column names, e.g. `Assignees:0`.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the header row with suffixes stripped.
    pub fn headers(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(|column| strip_column_suffix(column))
            .collect()
    }

    /// Returns the data rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Returns the cell for a suffixed column in a row.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let position = self.columns.iter().position(|name| name == column)?;
        self.rows.get(row)?.get(position).map(String::as_str)
    }

    /// Returns the number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Flattens processed issues into a table.
///
/// Record values are first expanded into `parent.child` fields. Base columns
/// are the union of field names in first-appearance order; each expands to as
/// many indexed columns as its widest list (at least one).
///
/// # Arguments
///
/// * `issues` - Processed issues in output order
///
/// # Returns
///
/// The flattened table.
pub fn flatten(issues: &[Issue]) -> FlatTable {
    let expanded: Vec<Vec<(String, FieldValue)>> = issues.iter().map(expand_records).collect();

    let mut bases: Vec<String> = Vec::new();
    let mut widths: HashMap<String, usize> = HashMap::new();
    for issue in &expanded {
        for (name, value) in issue {
            let width = match value {
                FieldValue::List(items) => items.len().max(1),
                _ => 1,
            };
            match widths.get_mut(name) {
                Some(current) => *current = (*current).max(width),
                None => {
                    bases.push(name.clone());
                    widths.insert(name.clone(), width);
                }
            }
        }
    }

    let columns = bases
        .iter()
        .flat_map(|base| (0..widths[base]).map(move |index| indexed_column(base, index)))
        .collect();

    let rows = expanded
        .iter()
        .map(|issue| {
            let lookup: HashMap<&str, &FieldValue> =
                issue.iter().map(|(name, value)| (name.as_str(), value)).collect();
            bases
                .iter()
                .flat_map(|base| {
                    let value = lookup.get(base.as_str()).copied();
                    (0..widths[base]).map(move |index| cell_at(value, index))
                })
                .collect()
        })
        .collect();

    FlatTable { columns, rows }
}

/// Writes a table as CSV with suffix-stripped headers.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_csv<W: Write>(table: &FlatTable, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(table.headers())?;
    for row in &table.rows {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes a table as CSV to a file, replacing it.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_csv_file(table: &FlatTable, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(table, std::io::BufWriter::new(file))
}

fn cell_at(value: Option<&FieldValue>, index: usize) -> String {
    match value {
        None => String::new(),
        Some(FieldValue::List(items)) => items.get(index).map(FieldValue::to_cell).unwrap_or_default(),
        Some(scalar) if index == 0 => scalar.to_cell(),
        Some(_) => String::new(),
    }
}

fn expand_records(issue: &Issue) -> Vec<(String, FieldValue)> {
    let mut fields = Vec::with_capacity(issue.len());
    for (name, value) in issue.iter() {
        push_expanded(&mut fields, name.to_string(), value);
    }
    fields
}

fn push_expanded(fields: &mut Vec<(String, FieldValue)>, name: String, value: &FieldValue) {
    match value {
        FieldValue::Record(entries) if !entries.is_empty() => {
            for (key, nested) in entries {
                push_expanded(fields, format!("{}.{}", name, key), nested);
            }
        }
        _ => fields.push((name, value.clone())),
    }
}
