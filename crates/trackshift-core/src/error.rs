// Rust guideline compliant 2026-10-18

//! Error types for the Trackshift core library.

use thiserror::Error;

/// Result type alias for Trackshift operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Trackshift operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Custom field carries a `$type` tag with no known unpacking.
    #[error("Unsupported field type '{tag}' for field '{field}'")]
    UnsupportedFieldType {
        /// The raw `$type` tag.
        tag: String,
        /// The field's display name.
        field: String,
    },

    /// A rule returned different numbers of column names and values.
    #[error("Rule '{rule}' returned {names} column names but {values} values")]
    RuleArityMismatch {
        /// Name of the offending rule.
        rule: String,
        /// Number of column names returned.
        names: usize,
        /// Number of values returned.
        values: usize,
    },

    /// Referenced issue does not exist in the issue set.
    #[error("Issue not found: {0}")]
    IssueNotFound(String),

    /// Referenced field does not exist on the issue.
    #[error("Field not found: {0}")]
    FieldNotFound(String),

    /// Parent chain revisits an issue.
    #[error("Cyclic hierarchy: {0:?}")]
    CyclicHierarchy(Vec<String>),

    /// A built-in rule could not interpret its input.
    #[error("Rule '{rule}' failed: {message}")]
    RuleFailed {
        /// Name of the failing rule.
        rule: String,
        /// What went wrong.
        message: String,
    },

    /// Raw issue record has an unusable shape.
    #[error("Malformed issue: {0}")]
    MalformedIssue(String),

    /// Invalid configuration value.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
