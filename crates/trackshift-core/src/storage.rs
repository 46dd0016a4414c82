// Rust guideline compliant 2026-10-18

//! Storage module for per-project data files.
//!
//! Each project gets a directory under the data root holding the cached
//! source issues, sprint and project metadata, downloaded attachments and
//! the converted CSV:
//!
//! ```text
//! <data>/<project>/<project>_youtrack_issues.json
//! <data>/<project>/<project>_youtrack_sprints.json
//! <data>/<project>/<project>_youtrack_project.json
//! <data>/<project>/<project>_jira_issues.csv
//! <data>/<project>/attachments/<issue id>/<file>
//! ```

use crate::{Config, Error, RawIssueSet, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// File layout and cache access for one project.
#[derive(Debug, Clone)]
pub struct Storage {
    /// Directory holding the project's files.
    project_dir: PathBuf,
    /// Project short name, used as file name prefix.
    project: String,
}

impl Storage {
    /// Creates a new Storage instance.
    ///
    /// # Arguments
    ///
    /// * `data_root` - Root data directory
    /// * `project` - Project short name
    ///
    /// # Returns
    ///
    /// A new Storage instance. No directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if the project name is empty or contains a path separator.
    pub fn new(data_root: &Path, project: &str) -> Result<Self> {
        Self::validate_project(project)?;
        Ok(Self {
            project_dir: data_root.join(project),
            project: project.to_string(),
        })
    }

    /// Creates a Storage instance for the configured project.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured project name is invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.data_storage_path, &config.project_name)
    }

    fn validate_project(project: &str) -> Result<()> {
        if project.trim().is_empty() {
            return Err(Error::InvalidConfig("project name cannot be empty".to_string()));
        }
        if project.contains(['/', '\\']) || project == "." || project == ".." {
            return Err(Error::InvalidConfig(format!(
                "project name '{}' is not a valid directory name",
                project
            )));
        }
        Ok(())
    }

    /// Returns the project short name.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Returns the project directory.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Returns the cached source issues path.
    pub fn issues_path(&self) -> PathBuf {
        self.file(&format!("{}_youtrack_issues.json", self.project))
    }

    /// Returns the sprint metadata path.
    pub fn sprints_path(&self) -> PathBuf {
        self.file(&format!("{}_youtrack_sprints.json", self.project))
    }

    /// Returns the project metadata path.
    pub fn project_path(&self) -> PathBuf {
        self.file(&format!("{}_youtrack_project.json", self.project))
    }

    /// Returns the converted CSV path.
    pub fn csv_path(&self) -> PathBuf {
        self.file(&format!("{}_jira_issues.csv", self.project))
    }

    /// Returns the attachment directory for one issue.
    pub fn attachment_dir(&self, issue_id: &str) -> PathBuf {
        self.project_dir.join("attachments").join(issue_id)
    }

    fn file(&self, name: &str) -> PathBuf {
        self.project_dir.join(name)
    }

    /// Creates the project directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.project_dir)?;
        Ok(())
    }

    /// Returns true if cached source issues exist.
    pub fn has_cached_issues(&self) -> bool {
        self.issues_path().is_file()
    }

    /// Loads the cached source issues.
    ///
    /// # Returns
    ///
    /// The raw issues in file order.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The file is not a JSON object or array of issues
    pub fn load_issues(&self) -> Result<RawIssueSet> {
        let path = self.issues_path();
        let content = std::fs::read_to_string(&path)?;
        let issues = RawIssueSet::from_json_str(&content)?;
        info!(path = %path.display(), count = issues.len(), "loaded cached issues");
        Ok(issues)
    }

    /// Writes the source issues cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_issues(&self, issues: &RawIssueSet) -> Result<()> {
        self.write_json(&self.issues_path(), issues)
    }

    /// Writes sprint metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_sprints<T: Serialize>(&self, sprints: &T) -> Result<()> {
        self.write_json(&self.sprints_path(), sprints)
    }

    /// Writes project metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_project<T: Serialize>(&self, project: &T) -> Result<()> {
        self.write_json(&self.project_path(), project)
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        self.ensure_dirs()?;
        let content = serde_json::to_string(value)?;
        std::fs::write(path, content)?;
        info!(path = %path.display(), "wrote cache file");
        Ok(())
    }
}
