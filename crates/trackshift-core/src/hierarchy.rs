// Rust guideline compliant 2026-10-18

//! Parent-chain traversal.
//!
//! The source tracker models Epic → Feature → User Story → Task purely through
//! "subtask of" links. The importer instead wants a component name, an epic
//! link and a story parent on each issue, so the chain above an issue is walked
//! to re-derive them.

use crate::{Error, FieldValue, IssueAccessor, Result, ID_FIELD};
use std::collections::HashSet;

/// Field holding an issue's type.
pub const TYPE_FIELD: &str = "Type";

/// Field holding an issue's parent link.
pub const PARENT_FIELD: &str = "subtask of";

/// Field holding an issue's title.
pub const SUMMARY_FIELD: &str = "summary";

/// Relationships derived from an issue's parent chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationshipTriple {
    /// Summary of the Epic ending the chain.
    pub component: Option<FieldValue>,
    /// Summary of the Feature on the chain.
    pub epic_link: Option<FieldValue>,
    /// Readable id of the User Story on the chain.
    pub subtask_of: Option<FieldValue>,
}

impl RelationshipTriple {
    /// Returns the triple as values in `(component, epic_link, subtask_of)` order.
    pub fn into_values(self) -> [FieldValue; 3] {
        [
            self.component.into(),
            self.epic_link.into(),
            self.subtask_of.into(),
        ]
    }
}

/// Walks the parent chain starting at a direct parent.
///
/// Each User Story on the chain sets `subtask_of` and each Feature sets
/// `epic_link`, later (higher) matches overwriting earlier ones. An Epic ends
/// the walk and provides the component. A parent without a type is a dead end
/// and yields an empty triple. A parent without a parent link ends the walk
/// with whatever was found.
///
/// # Arguments
///
/// * `parent_id` - Readable id of the issue's direct parent
/// * `issues` - Lookup over the whole issue set
///
/// # Returns
///
/// The derived relationship triple.
///
/// # Errors
///
/// Returns an error if:
/// - An issue on the chain is missing (`IssueNotFound`)
/// - A Feature or Epic on the chain lacks a summary (`FieldNotFound`)
/// - The chain revisits an issue (`CyclicHierarchy`)
pub fn resolve_parent_chain(parent_id: &str, issues: &IssueAccessor<'_>) -> Result<RelationshipTriple> {
    let mut triple = RelationshipTriple::default();
    let mut visited = HashSet::new();
    let mut path = Vec::new();
    let mut current = parent_id.to_string();

    loop {
        path.push(current.clone());
        if !visited.insert(current.clone()) {
            return Err(Error::CyclicHierarchy(path));
        }

        let parent = issues.get(&current)?;
        let kind = match parent.get(TYPE_FIELD) {
            None | Some(FieldValue::Null) => return Ok(RelationshipTriple::default()),
            Some(kind) => kind,
        };

        if kind.contains("User Story") {
            triple.subtask_of = Some(parent.get(ID_FIELD).cloned().unwrap_or_default());
        }
        if kind.contains("Feature") {
            triple.epic_link = Some(summary_of(parent)?);
        }
        if kind.contains("Epic") {
            triple.component = Some(summary_of(parent)?);
            return Ok(triple);
        }

        match parent.get(PARENT_FIELD).and_then(first_id) {
            Some(next) => current = next,
            None => return Ok(triple),
        }
    }
}

fn summary_of(issue: &crate::Issue) -> Result<FieldValue> {
    issue
        .get(SUMMARY_FIELD)
        .cloned()
        .ok_or_else(|| Error::FieldNotFound(SUMMARY_FIELD.to_string()))
}

/// First parent id of a link value: the text itself or a list's first text.
pub(crate) fn first_id(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Text(id) => Some(id.clone()),
        FieldValue::List(items) => items.first().and_then(FieldValue::as_text).map(String::from),
        _ => None,
    }
}
