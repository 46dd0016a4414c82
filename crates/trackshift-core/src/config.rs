// Rust guideline compliant 2026-10-18

//! Configuration management for Trackshift.

use crate::builtin::{is_builtin_rule, BUILTIN_RULE_NAMES};
use crate::time::Timezone;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "trackshift.toml";

/// Rule catalog selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSettings {
    /// Built-in rules to run, in execution order.
    #[serde(default = "default_rule_order")]
    pub order: Vec<String>,

    /// Offset added to sprint numbers to obtain importer sprint ids.
    #[serde(default = "default_sprint_id_offset")]
    pub sprint_id_offset: i64,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            order: default_rule_order(),
            sprint_id_offset: default_sprint_id_offset(),
        }
    }
}

/// Configuration for a conversion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Source project short name.
    #[serde(default)]
    pub project_name: String,

    /// Root directory for cached source data and CSV output.
    #[serde(default = "default_data_storage_path")]
    pub data_storage_path: PathBuf,

    /// Source REST API base URL, ending in `/`.
    #[serde(default)]
    pub api_url: String,

    /// File holding the API bearer token on its first line.
    #[serde(default = "default_token_path")]
    pub token_path: PathBuf,

    /// Base URL prefixed to attachment download paths.
    #[serde(default)]
    pub attachment_base_url: String,

    /// 1-based position of the first issue to fetch.
    #[serde(default = "default_start_issue")]
    pub start_issue: u32,

    /// Number of issues to fetch.
    #[serde(default = "default_num_issues")]
    pub num_issues_to_retrieve: u32,

    /// Field selector for issue requests.
    #[serde(default = "default_issue_fields")]
    pub issue_fields: String,

    /// Field selector for work item requests.
    #[serde(default = "default_work_item_fields")]
    pub work_item_fields: String,

    /// Whether to download issue attachments.
    #[serde(default)]
    pub save_attachments: bool,

    /// Whether to download even when cached data exists.
    #[serde(default)]
    pub prefer_api: bool,

    /// Timezone used to render dates.
    #[serde(default)]
    pub timezone: Timezone,

    /// Rule catalog selection.
    #[serde(default)]
    pub rules: RuleSettings,
}

fn default_data_storage_path() -> PathBuf {
    PathBuf::from("data")
}

fn default_token_path() -> PathBuf {
    PathBuf::from("youtrack_token.txt")
}

fn default_start_issue() -> u32 {
    1
}

fn default_num_issues() -> u32 {
    1000
}

fn default_issue_fields() -> String {
    concat!(
        "id,idReadable,summary,description,created,updated,resolved,",
        "reporter(email,banned),updater(email,banned),tags(name),",
        "comments(created,text,author(email,fullName,banned)),",
        "links(direction,linkType(sourceToTarget,targetToSource),issues(idReadable)),",
        "customFields(name,$type,value(name,text,minutes,email,banned,$type))"
    )
    .to_string()
}

fn default_work_item_fields() -> String {
    "issue(idReadable),creator(email,fullName,banned),type(name),text,date,duration(minutes)"
        .to_string()
}

fn default_rule_order() -> Vec<String> {
    BUILTIN_RULE_NAMES.iter().map(|name| name.to_string()).collect()
}

fn default_sprint_id_offset() -> i64 {
    7
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            data_storage_path: default_data_storage_path(),
            api_url: String::new(),
            token_path: default_token_path(),
            attachment_base_url: String::new(),
            start_issue: default_start_issue(),
            num_issues_to_retrieve: default_num_issues(),
            issue_fields: default_issue_fields(),
            work_item_fields: default_work_item_fields(),
            save_attachments: false,
            prefer_api: false,
            timezone: Timezone::default(),
            rules: RuleSettings::default(),
        }
    }
}

impl Config {
    /// Loads configuration from file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. Configuration file at `path`, if it exists
    /// 3. Environment variables with `TRACKSHIFT_` prefix
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML configuration file
    ///
    /// # Returns
    ///
    /// A Config struct with values from file and environment variables applied.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file exists but cannot be read
    /// - Configuration file contains invalid TOML
    /// - Configuration values fail validation
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Self::default();

        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            config = toml::from_str(&content)
                .map_err(|e| Error::InvalidConfig(format!("Invalid config file: {}", e)))?;
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `TRACKSHIFT_PROJECT_NAME` - Source project short name
    /// - `TRACKSHIFT_DATA_STORAGE_PATH` - Data directory
    /// - `TRACKSHIFT_API_URL` - REST API base URL
    /// - `TRACKSHIFT_TOKEN_PATH` - Token file path
    /// - `TRACKSHIFT_ATTACHMENT_BASE_URL` - Attachment base URL
    /// - `TRACKSHIFT_START_ISSUE` - First issue position
    /// - `TRACKSHIFT_NUM_ISSUES_TO_RETRIEVE` - Issue count
    /// - `TRACKSHIFT_SAVE_ATTACHMENTS` - Download attachments (true/false)
    /// - `TRACKSHIFT_PREFER_API` - Ignore cached data (true/false)
    /// - `TRACKSHIFT_TIMEZONE` - Date timezone (local/utc)
    /// - `TRACKSHIFT_SPRINT_ID_OFFSET` - Sprint id offset
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable values are invalid.
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("TRACKSHIFT_PROJECT_NAME") {
            self.project_name = val;
        }

        if let Ok(val) = std::env::var("TRACKSHIFT_DATA_STORAGE_PATH") {
            self.data_storage_path = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("TRACKSHIFT_API_URL") {
            self.api_url = val;
        }

        if let Ok(val) = std::env::var("TRACKSHIFT_TOKEN_PATH") {
            self.token_path = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("TRACKSHIFT_ATTACHMENT_BASE_URL") {
            self.attachment_base_url = val;
        }

        if let Ok(val) = std::env::var("TRACKSHIFT_START_ISSUE") {
            self.start_issue = val.parse().map_err(|_| {
                Error::InvalidConfig("TRACKSHIFT_START_ISSUE must be a positive number".to_string())
            })?;
        }

        if let Ok(val) = std::env::var("TRACKSHIFT_NUM_ISSUES_TO_RETRIEVE") {
            self.num_issues_to_retrieve = val.parse().map_err(|_| {
                Error::InvalidConfig(
                    "TRACKSHIFT_NUM_ISSUES_TO_RETRIEVE must be a positive number".to_string(),
                )
            })?;
        }

        if let Ok(val) = std::env::var("TRACKSHIFT_SAVE_ATTACHMENTS") {
            self.save_attachments = val.parse().map_err(|_| {
                Error::InvalidConfig("TRACKSHIFT_SAVE_ATTACHMENTS must be true or false".to_string())
            })?;
        }

        if let Ok(val) = std::env::var("TRACKSHIFT_PREFER_API") {
            self.prefer_api = val.parse().map_err(|_| {
                Error::InvalidConfig("TRACKSHIFT_PREFER_API must be true or false".to_string())
            })?;
        }

        if let Ok(val) = std::env::var("TRACKSHIFT_TIMEZONE") {
            self.timezone = val.parse()?;
        }

        if let Ok(val) = std::env::var("TRACKSHIFT_SPRINT_ID_OFFSET") {
            self.rules.sprint_id_offset = val.parse().map_err(|_| {
                Error::InvalidConfig("TRACKSHIFT_SPRINT_ID_OFFSET must be a number".to_string())
            })?;
        }

        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - start_issue or num_issues_to_retrieve is zero
    /// - a rule name in `rules.order` is not a built-in rule
    /// - attachments are requested without an attachment base URL
    fn validate(&self) -> Result<()> {
        if self.start_issue == 0 {
            return Err(Error::InvalidConfig(
                "start_issue must be greater than 0".to_string(),
            ));
        }

        if self.num_issues_to_retrieve == 0 {
            return Err(Error::InvalidConfig(
                "num_issues_to_retrieve must be greater than 0".to_string(),
            ));
        }

        if let Some(unknown) = self.rules.order.iter().find(|name| !is_builtin_rule(name)) {
            return Err(Error::InvalidConfig(format!(
                "unknown rule '{}', expected one of {:?}",
                unknown, BUILTIN_RULE_NAMES
            )));
        }

        if self.save_attachments && self.attachment_base_url.is_empty() {
            return Err(Error::InvalidConfig(
                "attachment_base_url is required when save_attachments is enabled".to_string(),
            ));
        }

        Ok(())
    }

    /// Returns a copy of this configuration for another project.
    pub fn for_project(&self, project_name: &str) -> Self {
        Self {
            project_name: project_name.to_string(),
            ..self.clone()
        }
    }

    /// Returns the issue field selector with all whitespace removed.
    pub fn issue_field_selector(&self) -> String {
        strip_whitespace(&self.issue_fields)
    }

    /// Returns the work item field selector with all whitespace removed.
    pub fn work_item_field_selector(&self) -> String {
        strip_whitespace(&self.work_item_fields)
    }

    /// Saves the configuration to a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Destination file path
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be created or written
    /// - Serialization fails
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::InvalidConfig(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn strip_whitespace(selector: &str) -> String {
    selector.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::TempDir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ENV_VARS: [&str; 11] = [
        "TRACKSHIFT_PROJECT_NAME",
        "TRACKSHIFT_DATA_STORAGE_PATH",
        "TRACKSHIFT_API_URL",
        "TRACKSHIFT_TOKEN_PATH",
        "TRACKSHIFT_ATTACHMENT_BASE_URL",
        "TRACKSHIFT_START_ISSUE",
        "TRACKSHIFT_NUM_ISSUES_TO_RETRIEVE",
        "TRACKSHIFT_SAVE_ATTACHMENTS",
        "TRACKSHIFT_PREFER_API",
        "TRACKSHIFT_TIMEZONE",
        "TRACKSHIFT_SPRINT_ID_OFFSET",
    ];

    fn clean_env() -> MutexGuard<'static, ()> {
        let guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
        guard
    }

    fn clear_all_env_vars() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data_storage_path, PathBuf::from("data"));
        assert_eq!(config.start_issue, 1);
        assert_eq!(config.num_issues_to_retrieve, 1000);
        assert_eq!(config.timezone, Timezone::Local);
        assert_eq!(config.rules.sprint_id_offset, 7);
        assert_eq!(config.rules.order.len(), BUILTIN_RULE_NAMES.len());
        assert!(!config.save_attachments);
        assert!(!config.prefer_api);
    }

    #[test]
    fn test_config_load_missing_file() {
        let _guard = clean_env();
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(&temp_dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_load_from_file() {
        let _guard = clean_env();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        let content = r#"
project_name = "PLAT"
data_storage_path = "/tmp/yt"
api_url = "https://example.youtrack.cloud/api/"
start_issue = 11
num_issues_to_retrieve = 50
timezone = "utc"

[rules]
order = ["DELETE_IF", "Type"]
sprint_id_offset = 3
"#;
        std::fs::write(&config_path, content).unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.project_name, "PLAT");
        assert_eq!(config.data_storage_path, PathBuf::from("/tmp/yt"));
        assert_eq!(config.start_issue, 11);
        assert_eq!(config.num_issues_to_retrieve, 50);
        assert_eq!(config.timezone, Timezone::Utc);
        assert_eq!(config.rules.order, vec!["DELETE_IF", "Type"]);
        assert_eq!(config.rules.sprint_id_offset, 3);
    }

    #[test]
    fn test_config_invalid_toml() {
        let _guard = clean_env();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, "start_issue = [").unwrap();
        assert!(matches!(Config::load(&config_path), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_config_validation_zero_start_issue() {
        let _guard = clean_env();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, "start_issue = 0").unwrap();
        assert!(Config::load(&config_path).is_err());
    }

    #[test]
    fn test_config_validation_unknown_rule() {
        let _guard = clean_env();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, "[rules]\norder = [\"Mystery\"]").unwrap();
        assert!(Config::load(&config_path).is_err());
    }

    #[test]
    fn test_config_validation_attachments_need_base_url() {
        let _guard = clean_env();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, "save_attachments = true").unwrap();
        assert!(Config::load(&config_path).is_err());
    }

    #[test]
    fn test_config_env_override_project() {
        let _guard = clean_env();
        let temp_dir = TempDir::new().unwrap();

        std::env::set_var("TRACKSHIFT_PROJECT_NAME", "OPS");
        std::env::set_var("TRACKSHIFT_TIMEZONE", "utc");
        let config = Config::load(&temp_dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config.project_name, "OPS");
        assert_eq!(config.timezone, Timezone::Utc);

        clear_all_env_vars();
    }

    #[test]
    fn test_config_env_invalid_number() {
        let _guard = clean_env();
        let temp_dir = TempDir::new().unwrap();

        std::env::set_var("TRACKSHIFT_START_ISSUE", "first");
        let result = Config::load(&temp_dir.path().join(CONFIG_FILE_NAME));
        assert!(result.is_err());

        clear_all_env_vars();
    }

    #[test]
    fn test_config_env_invalid_timezone() {
        let _guard = clean_env();
        let temp_dir = TempDir::new().unwrap();

        std::env::set_var("TRACKSHIFT_TIMEZONE", "mars");
        let result = Config::load(&temp_dir.path().join(CONFIG_FILE_NAME));
        assert!(result.is_err());

        clear_all_env_vars();
    }

    #[test]
    fn test_config_file_overridden_by_env() {
        let _guard = clean_env();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, "[rules]\nsprint_id_offset = 2").unwrap();

        std::env::set_var("TRACKSHIFT_SPRINT_ID_OFFSET", "9");
        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.rules.sprint_id_offset, 9);

        clear_all_env_vars();
    }

    #[test]
    fn test_config_save_and_load() {
        let _guard = clean_env();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);

        let original = Config {
            project_name: "PLAT".to_string(),
            prefer_api: true,
            timezone: Timezone::Utc,
            ..Config::default()
        };

        original.save(&config_path).unwrap();
        let loaded = Config::load(&config_path).unwrap();
        assert_eq!(original, loaded);
    }

    #[test]
    fn test_for_project() {
        let config = Config::default().for_project("OPS");
        assert_eq!(config.project_name, "OPS");
        assert_eq!(config.start_issue, 1);
    }

    #[test]
    fn test_field_selectors_strip_whitespace() {
        let config = Config {
            issue_fields: "id,\n  summary,\tcustomFields(name)".to_string(),
            ..Config::default()
        };
        assert_eq!(config.issue_field_selector(), "id,summary,customFields(name)");
    }
}
