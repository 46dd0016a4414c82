// Rust guideline compliant 2026-10-18

//! Read-only lookups handed to transformation rules.

use crate::{Error, FieldValue, Issue, IssueSet, Result};

/// Looks up fields on the issue a rule is running against.
#[derive(Debug, Clone, Copy)]
pub struct FieldAccessor<'a> {
    issue: &'a Issue,
}

impl<'a> FieldAccessor<'a> {
    /// Creates an accessor over one issue.
    pub fn new(issue: &'a Issue) -> Self {
        Self { issue }
    }

    /// Returns a field's value.
    ///
    /// # Errors
    ///
    /// Returns `FieldNotFound` if the issue has no such field.
    pub fn get(&self, name: &str) -> Result<&'a FieldValue> {
        self.issue
            .get(name)
            .ok_or_else(|| Error::FieldNotFound(name.to_string()))
    }

    /// Returns the whole issue.
    pub fn issue(&self) -> &'a Issue {
        self.issue
    }
}

/// Looks up other issues of the set by readable id.
#[derive(Debug, Clone, Copy)]
pub struct IssueAccessor<'a> {
    issues: &'a IssueSet,
}

impl<'a> IssueAccessor<'a> {
    /// Creates an accessor over an issue set.
    pub fn new(issues: &'a IssueSet) -> Self {
        Self { issues }
    }

    /// Returns the issue with a readable id.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if no issue has that id.
    pub fn get(&self, id: &str) -> Result<&'a Issue> {
        self.issues
            .get(id)
            .ok_or_else(|| Error::IssueNotFound(id.to_string()))
    }
}
