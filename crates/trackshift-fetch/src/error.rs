// Rust guideline compliant 2026-10-18

//! Error types for the YouTrack fetch layer.

use thiserror::Error;

/// Result type alias for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;

/// Error types for fetch operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// No project short name matched the configured project.
    #[error("Project {project} does not exist, available projects: {available:?}")]
    ProjectNotFound {
        /// The requested project name.
        project: String,
        /// Short names of the projects the server returned.
        available: Vec<String>,
    },

    /// Core library error.
    #[error(transparent)]
    Core(#[from] trackshift_core::Error),

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Http(e.to_string())
    }
}
