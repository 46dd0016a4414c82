// Rust guideline compliant 2026-10-18

//! Command implementations for the Trackshift CLI.

pub mod convert;
pub mod download;

use anyhow::{bail, Result};
use trackshift_core::Config;

/// Per-project results of a multi-project run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome<T> {
    /// Results of the projects that succeeded.
    pub succeeded: Vec<T>,
    /// Names of the projects that failed.
    pub failed: Vec<String>,
}

impl<T> Default for RunOutcome<T> {
    fn default() -> Self {
        Self {
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }
}

impl<T> RunOutcome<T> {
    /// Returns true if every project succeeded.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Resolves the projects to process.
///
/// # Errors
///
/// Returns an error if no project was named and none is configured.
pub fn project_names(config: &Config, projects: &[String]) -> Result<Vec<String>> {
    if !projects.is_empty() {
        return Ok(projects.to_vec());
    }
    if config.project_name.trim().is_empty() {
        bail!("no project given; pass project names or set project_name in the config file");
    }
    Ok(vec![config.project_name.clone()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_names_prefers_arguments() {
        let config = Config {
            project_name: "PLAT".to_string(),
            ..Config::default()
        };
        let names = project_names(&config, &["A".to_string(), "B".to_string()]).unwrap();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_project_names_falls_back_to_config() {
        let config = Config {
            project_name: "PLAT".to_string(),
            ..Config::default()
        };
        assert_eq!(project_names(&config, &[]).unwrap(), vec!["PLAT"]);
    }

    #[test]
    fn test_project_names_requires_a_project() {
        assert!(project_names(&Config::default(), &[]).is_err());
    }

    #[test]
    fn test_outcome_success() {
        let mut outcome: RunOutcome<()> = RunOutcome::default();
        assert!(outcome.is_success());
        outcome.failed.push("X".to_string());
        assert!(!outcome.is_success());
    }
}
