// Rust guideline compliant 2026-10-18

//! Timestamp rendering for the importer's date columns.

use crate::{Error, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Date format understood by the CSV importer.
pub const DATETIME_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// Timezone used when rendering timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Timezone {
    /// The host's local timezone.
    #[default]
    Local,
    /// Coordinated Universal Time.
    Utc,
}

impl FromStr for Timezone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "local" => Ok(Timezone::Local),
            "utc" => Ok(Timezone::Utc),
            other => Err(Error::InvalidConfig(format!(
                "timezone must be local or utc, got {}",
                other
            ))),
        }
    }
}

/// Renders a millisecond epoch timestamp as `MM/DD/YYYY HH:MM:SS`.
///
/// Sub-second precision is truncated.
///
/// # Arguments
///
/// * `millis` - Milliseconds since the Unix epoch
/// * `timezone` - Timezone to render in
///
/// # Returns
///
/// The formatted date string.
///
/// # Errors
///
/// Returns an error if the timestamp is outside the representable range.
pub fn format_timestamp(millis: i64, timezone: Timezone) -> Result<String> {
    let seconds = millis / 1000;
    let utc = DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| Error::MalformedIssue(format!("timestamp out of range: {}", millis)))?;
    let formatted = match timezone {
        Timezone::Utc => utc.format(DATETIME_FORMAT).to_string(),
        Timezone::Local => utc.with_timezone(&Local).format(DATETIME_FORMAT).to_string(),
    };
    Ok(formatted)
}
