// Rust guideline compliant 2026-10-18

//! Rule-name and column-name mangling.
//!
//! Rule names are identifiers, so a field name is encoded by doubling literal
//! underscores and then turning spaces into single underscores. Column names
//! carry a `:N` suffix while flattened so that several outputs sharing a
//! display name stay distinct until the header is written.

/// Encodes a field name as a rule name.
///
/// `_` becomes `__`, then each space becomes `_`.
///
/// # Examples
///
/// ```
/// use trackshift_core::naming::mangle_rule_name;
/// assert_eq!(mangle_rule_name("Task Deliverable Links"), "Task_Deliverable_Links");
/// assert_eq!(mangle_rule_name("story_points"), "story__points");
/// ```
pub fn mangle_rule_name(field_name: &str) -> String {
    field_name.replace('_', "__").replace(' ', "_")
}

/// Decodes a rule name back into a field name.
///
/// Scans left to right: `__` becomes `_` and a lone `_` becomes a space.
/// Names whose spaces are directly followed by another space or an underscore
/// do not survive a mangle/demangle round trip.
///
/// # Examples
///
/// ```
/// use trackshift_core::naming::demangle_rule_name;
/// assert_eq!(demangle_rule_name("subtask_of"), "subtask of");
/// assert_eq!(demangle_rule_name("story__points"), "story_points");
/// ```
pub fn demangle_rule_name(rule_name: &str) -> String {
    let mut field_name = String::with_capacity(rule_name.len());
    let mut chars = rule_name.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '_' {
            field_name.push(c);
        } else if chars.peek() == Some(&'_') {
            chars.next();
            field_name.push('_');
        } else {
            field_name.push(' ');
        }
    }
    field_name
}

/// Builds the flattened column name for one list position.
pub fn indexed_column(base: &str, index: usize) -> String {
    format!("{}:{}", base, index)
}

/// Strips a `:N` suffix, cutting at the first `:`.
pub fn strip_column_suffix(column: &str) -> &str {
    column.split_once(':').map_or(column, |(base, _)| base)
}
