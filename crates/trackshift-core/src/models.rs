// Rust guideline compliant 2026-10-18

//! Core data models for Trackshift.
//!
//! This module defines the issue shapes flowing through a conversion:
//! the raw source records keyed by readable id, the normalized [`Issue`]
//! field mapping and the ordered [`IssueSet`] used for cross-issue lookups.

use crate::{Error, FieldValue, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Name of the field holding an issue's human-readable id.
pub const ID_FIELD: &str = "idReadable";

/// A normalized issue: an insertion-ordered mapping of field name to value.
///
/// Replacing an existing field keeps its position; new fields are appended.
/// Column order in the final table follows this order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Issue {
    fields: Vec<(String, FieldValue)>,
}

impl Issue {
    /// Creates an empty issue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the readable id, if present and textual.
    pub fn id(&self) -> Option<&str> {
        self.get(ID_FIELD).and_then(FieldValue::as_text)
    }

    /// Returns the value of a field.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Returns a mutable reference to a field's value.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldValue> {
        self.fields
            .iter_mut()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Returns true if the field exists (even when null).
    pub fn contains_key(&self, name: &str) -> bool {
        self.fields.iter().any(|(key, _)| key == name)
    }

    /// Sets a field, keeping its position when it already exists.
    ///
    /// # Arguments
    ///
    /// * `name` - The field name
    /// * `value` - The new value
    ///
    /// # Returns
    ///
    /// The previous value, if the field existed.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        let name = name.into();
        match self.get_mut(&name) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.fields.push((name, value));
                None
            }
        }
    }

    /// Removes a field, preserving the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        let position = self.fields.iter().position(|(key, _)| key == name)?;
        Some(self.fields.remove(position).1)
    }

    /// Iterates over fields in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Iterates over field names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the issue has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for Issue {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        let mut issue = Issue::new();
        for (key, value) in iter {
            issue.insert(key, value);
        }
        issue
    }
}

impl IntoIterator for Issue {
    type Item = (String, FieldValue);
    type IntoIter = std::vec::IntoIter<(String, FieldValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// Ordered collection of normalized issues keyed by readable id.
///
/// Source order is kept; the relation fix-up pass depends on it.
#[derive(Debug, Clone, Default)]
pub struct IssueSet {
    issues: Vec<Issue>,
    index: HashMap<String, usize>,
}

impl IssueSet {
    /// Creates an empty issue set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from issues in order.
    ///
    /// # Errors
    ///
    /// Returns an error if an issue has no readable id or an id repeats.
    pub fn from_issues(issues: Vec<Issue>) -> Result<Self> {
        let mut set = Self::new();
        for issue in issues {
            set.push(issue)?;
        }
        Ok(set)
    }

    /// Appends an issue.
    ///
    /// # Arguments
    ///
    /// * `issue` - The issue to append
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The issue has no textual `idReadable`
    /// - An issue with the same id is already present
    pub fn push(&mut self, issue: Issue) -> Result<()> {
        let id = issue
            .id()
            .ok_or_else(|| Error::MalformedIssue(format!("issue without {}", ID_FIELD)))?
            .to_string();
        if self.index.contains_key(&id) {
            return Err(Error::MalformedIssue(format!("duplicate issue id {}", id)));
        }
        self.index.insert(id, self.issues.len());
        self.issues.push(issue);
        Ok(())
    }

    /// Looks up an issue by readable id.
    pub fn get(&self, id: &str) -> Option<&Issue> {
        self.index.get(id).map(|&position| &self.issues[position])
    }

    /// Returns the issue at a position in source order.
    pub fn get_index(&self, position: usize) -> Option<&Issue> {
        self.issues.get(position)
    }

    /// Returns a mutable issue at a position in source order.
    pub fn get_index_mut(&mut self, position: usize) -> Option<&mut Issue> {
        self.issues.get_mut(position)
    }

    /// Iterates over issues in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Issue> {
        self.issues.iter()
    }

    /// Returns the number of issues.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Consumes the set, returning issues in source order.
    pub fn into_vec(self) -> Vec<Issue> {
        self.issues
    }
}

impl<'a> IntoIterator for &'a IssueSet {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}

/// Raw source issue records keyed by readable id, in source order.
///
/// Serializes as a JSON object keyed by id. Deserialization also accepts a
/// JSON array of records carrying `idReadable`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RawIssueSet {
    issues: Map<String, Value>,
}

impl RawIssueSet {
    /// Creates an empty raw issue set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a raw set from a parsed JSON document.
    ///
    /// # Arguments
    ///
    /// * `value` - A JSON object keyed by id, or an array of issue records
    ///
    /// # Errors
    ///
    /// Returns an error if the document is neither shape, or an array entry
    /// lacks a textual `idReadable`.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(issues) => Ok(Self { issues }),
            Value::Array(records) => {
                let mut set = Self::new();
                for record in records {
                    set.insert(record)?;
                }
                Ok(set)
            }
            _ => Err(Error::MalformedIssue(
                "issue document must be an object or array".to_string(),
            )),
        }
    }

    /// Parses a raw set from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON or has the wrong shape.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// Inserts a record keyed by its `idReadable`.
    ///
    /// # Errors
    ///
    /// Returns an error if the record has no textual `idReadable`.
    pub fn insert(&mut self, record: Value) -> Result<()> {
        let id = record
            .get(ID_FIELD)
            .and_then(Value::as_str)
            .ok_or_else(|| Error::MalformedIssue(format!("record without {}", ID_FIELD)))?
            .to_string();
        self.issues.insert(id, record);
        Ok(())
    }

    /// Returns the record for an id.
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.issues.get(id)
    }

    /// Returns a mutable record for an id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Value> {
        self.issues.get_mut(id)
    }

    /// Iterates over (id, record) pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.issues.iter()
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

impl IntoIterator for RawIssueSet {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}

impl<'de> Deserialize<'de> for RawIssueSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}
