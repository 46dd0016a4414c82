// Rust guideline compliant 2026-10-18

//! Blocking YouTrack REST client.
//!
//! Every API call carries the bearer token read from the configured token
//! file. Attachment files are fetched from absolute URLs without the token.

use crate::error::{FetchError, Result};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use trackshift_core::{Config, Error};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Reads the API token from the first line of a token file.
///
/// # Arguments
///
/// * `path` - Token file path
///
/// # Returns
///
/// The first line with surrounding whitespace removed.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its first line is empty.
pub fn read_token(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path)?;
    let token = content.lines().next().unwrap_or_default().trim();
    if token.is_empty() {
        return Err(Error::InvalidConfig(format!("token file {} is empty", path.display())).into());
    }
    Ok(token.to_string())
}

/// YouTrack REST API client.
#[derive(Debug, Clone)]
pub struct YouTrackClient {
    http: reqwest::blocking::Client,
    api_url: String,
    token: String,
}

impl YouTrackClient {
    /// Creates a client for an API root such as `https://host/api/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL is empty or the HTTP client cannot be built.
    pub fn new(api_url: &str, token: String) -> Result<Self> {
        if api_url.trim().is_empty() {
            return Err(Error::InvalidConfig("api_url is required to download".to_string()).into());
        }
        let http = reqwest::blocking::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let mut api_url = api_url.trim().to_string();
        if !api_url.ends_with('/') {
            api_url.push('/');
        }
        Ok(Self { http, api_url, token })
    }

    /// Creates a client from configuration, reading the token file.
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL is missing or the token cannot be read.
    pub fn from_config(config: &Config) -> Result<Self> {
        if config.api_url.trim().is_empty() {
            return Err(Error::InvalidConfig("api_url is required to download".to_string()).into());
        }
        let token = read_token(&config.token_path)?;
        Self::new(&config.api_url, token)
    }

    /// Returns the absolute URL for an API path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path.trim_start_matches('/'))
    }

    /// Sends an authenticated GET and decodes the JSON body.
    ///
    /// # Arguments
    ///
    /// * `path` - Path relative to the API root
    /// * `query` - Query parameters
    ///
    /// # Errors
    ///
    /// Returns `Http` if the request fails or the status is not a success,
    /// and `Json` if the body does not decode.
    pub fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = self.endpoint(path);
        debug!(url = %url, "GET");
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
            .query(query)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(FetchError::Http(format!("{} returned {}: {}", url, status, body)));
        }

        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Downloads raw bytes from an absolute URL, bypassing caches.
    ///
    /// # Errors
    ///
    /// Returns `Http` if the request fails or the status is not a success.
    pub fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.http.get(url).header("Cache-Control", "no-cache").send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http(format!("{} returned {}", url, status)));
        }
        Ok(response.bytes()?.to_vec())
    }
}
