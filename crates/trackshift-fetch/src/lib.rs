// Rust guideline compliant 2026-10-18

//! Trackshift Fetch Library
//!
//! This crate provides the YouTrack side of Trackshift:
//! - A blocking REST client authenticated with a bearer token file
//! - Project download (issues, work items, agile boards, attachments)
//! - Cache-or-download loading of a project's raw issues

pub mod client;
pub mod download;
pub mod error;

pub use client::{read_token, YouTrackClient};
pub use download::{download_project, Attachment, DownloadReport};
pub use error::{FetchError, Result};

use tracing::info;
use trackshift_core::{Config, RawIssueSet, Storage};

/// Where a project's raw issues came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueSource {
    /// Loaded from the cache file.
    Cache,
    /// Downloaded from the API.
    Api(DownloadReport),
}

/// Loads a project's raw issues from cache, downloading them when needed.
///
/// The cache is used unless `prefer_api` is set or the issues file is
/// missing; a download refreshes all cache files.
///
/// # Arguments
///
/// * `config` - Settings for the project to load
///
/// # Returns
///
/// The raw issues and where they came from.
///
/// # Errors
///
/// Returns an error if:
/// - The project name is invalid
/// - The cache file cannot be read or parsed
/// - A download is needed and fails
pub fn load_or_download(config: &Config) -> Result<(RawIssueSet, IssueSource)> {
    let storage = Storage::from_config(config)?;

    if !config.prefer_api && storage.has_cached_issues() {
        let issues = storage.load_issues()?;
        return Ok((issues, IssueSource::Cache));
    }

    info!(project = %config.project_name, "downloading data");
    let client = YouTrackClient::from_config(config)?;
    let (issues, report) = download_project(&client, config, &storage)?;
    Ok((issues, IssueSource::Api(report)))
}

/// Downloads a project unconditionally and writes its cache files.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the download fails.
pub fn refresh_cache(config: &Config) -> Result<DownloadReport> {
    let storage = Storage::from_config(config)?;
    let client = YouTrackClient::from_config(config)?;
    let (_, report) = download_project(&client, config, &storage)?;
    Ok(report)
}
