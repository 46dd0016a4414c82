// Rust guideline compliant 2026-10-18

//! Built-in rule catalog for YouTrack to Jira conversion.
//!
//! The catalog maps the source hierarchy (Epic → Feature → User Story → Task)
//! onto the importer's (Component → Epic → Story), splits multiple assignees,
//! converts sprint names to importer ids and rewrites Markdown headings.

use crate::config::RuleSettings;
use crate::hierarchy::{first_id, resolve_parent_chain, SUMMARY_FIELD, TYPE_FIELD};
use crate::markup::markdown_headings_to_markup;
use crate::rules::{FieldRule, RuleOutput, RuleRegistry, DELETE_IF};
use crate::{Error, FieldAccessor, FieldValue, IssueAccessor, Result, ID_FIELD};
use tracing::warn;

/// Built-in rule names in their default execution order.
pub const BUILTIN_RULE_NAMES: [&str; 8] = [
    DELETE_IF,
    "subtask_of",
    "Assignees",
    "Type",
    "Sprints",
    "description",
    "comments",
    "Task_Deliverable_Links",
];

/// Returns true if `name` is a built-in rule.
pub fn is_builtin_rule(name: &str) -> bool {
    BUILTIN_RULE_NAMES.contains(&name)
}

/// Builds a registry from the configured catalog selection.
///
/// # Arguments
///
/// * `settings` - Rule order and parameters
///
/// # Returns
///
/// A registry holding the selected rules in the configured order.
///
/// # Errors
///
/// Returns `InvalidConfig` for a name that is not a built-in rule.
pub fn builtin_registry(settings: &RuleSettings) -> Result<RuleRegistry> {
    let mut registry = RuleRegistry::new();
    for name in &settings.order {
        match name.as_str() {
            DELETE_IF => {
                registry.set_delete_if(delete_epics);
            }
            "subtask_of" => {
                registry.register(name, subtask_of);
            }
            "Assignees" => {
                registry.register(name, assignees);
            }
            "Type" => {
                registry.register(name, issue_type);
            }
            "Sprints" => {
                registry.register(
                    name,
                    SprintIds {
                        offset: settings.sprint_id_offset,
                    },
                );
            }
            "description" => {
                registry.register(name, description);
            }
            "comments" => {
                registry.register(name, comments);
            }
            "Task_Deliverable_Links" => {
                registry.register(name, task_deliverable_links);
            }
            unknown => {
                return Err(Error::InvalidConfig(format!("unknown rule '{}'", unknown)));
            }
        }
    }
    Ok(registry)
}

/// Drops Epics; they become components rather than issues.
fn delete_epics(fields: &FieldAccessor<'_>, _: &IssueAccessor<'_>) -> Result<bool> {
    match fields.get(TYPE_FIELD) {
        Ok(kind) => Ok(kind.contains("Epic")),
        Err(Error::FieldNotFound(_)) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Re-derives component, epic link and story parent from the parent chain.
///
/// Missing issues or fields on the chain degrade to empty values with a warning.
fn subtask_of(
    value: &FieldValue,
    fields: &FieldAccessor<'_>,
    issues: &IssueAccessor<'_>,
) -> Result<RuleOutput> {
    if value.is_null() {
        return Ok(RuleOutput::single("subtask of", FieldValue::Null));
    }

    let issue_id = fields
        .get(ID_FIELD)
        .map(FieldValue::to_cell)
        .unwrap_or_default();
    let triple = match first_id(value) {
        Some(parent) => match resolve_parent_chain(&parent, issues) {
            Ok(triple) => triple,
            Err(e @ (Error::IssueNotFound(_) | Error::FieldNotFound(_))) => {
                warn!(issue = %issue_id, error = %e, "failed to traverse relationships");
                Default::default()
            }
            Err(e) => return Err(e),
        },
        None => {
            warn!(issue = %issue_id, "parent link is not an issue id");
            Default::default()
        }
    };

    let [component, epic_link, story] = triple.into_values();
    Ok(RuleOutput::Many(
        vec![
            "Component".to_string(),
            "Epic Link".to_string(),
            "youtrack subtask of".to_string(),
            "subtask of".to_string(),
        ],
        vec![component, epic_link, story, value.clone()],
    ))
}

/// Keeps the first assignee and overflows the rest into Swarmers.
fn assignees(value: &FieldValue, _: &FieldAccessor<'_>, _: &IssueAccessor<'_>) -> Result<RuleOutput> {
    match value {
        FieldValue::List(people) if people.len() > 1 => Ok(RuleOutput::Many(
            vec!["Assignees".to_string(), "Swarmers".to_string()],
            vec![people[0].clone(), FieldValue::List(people[1..].to_vec())],
        )),
        _ => Ok(RuleOutput::single("Assignees", value.clone())),
    }
}

/// Maps Feature to Epic (with its Epic Name) and Epic to Component.
fn issue_type(
    value: &FieldValue,
    fields: &FieldAccessor<'_>,
    _: &IssueAccessor<'_>,
) -> Result<RuleOutput> {
    if value.contains("Feature") {
        return Ok(RuleOutput::Many(
            vec!["Type".to_string(), "Epic Name".to_string()],
            vec![FieldValue::from("Epic"), fields.get(SUMMARY_FIELD)?.clone()],
        ));
    }
    if value.contains("Epic") {
        return Ok(RuleOutput::single("Type", "Component"));
    }
    Ok(RuleOutput::single("Type", value.clone()))
}

/// Converts sprint names ending in a number into importer sprint ids.
///
/// Backlog and bug board pseudo-sprints become null.
#[derive(Debug, Clone, Copy)]
pub struct SprintIds {
    /// Added to each sprint number.
    pub offset: i64,
}

impl FieldRule for SprintIds {
    fn apply(
        &self,
        value: &FieldValue,
        _: &FieldAccessor<'_>,
        _: &IssueAccessor<'_>,
    ) -> Result<RuleOutput> {
        if value.is_null() {
            return Ok(RuleOutput::single("Sprints", FieldValue::Null));
        }
        let ids = value
            .to_elements()
            .iter()
            .map(|sprint| self.sprint_id(sprint))
            .collect::<Result<Vec<_>>>()?;
        Ok(RuleOutput::single("Sprints", FieldValue::List(ids)))
    }
}

impl SprintIds {
    fn sprint_id(&self, sprint: &FieldValue) -> Result<FieldValue> {
        let name = sprint.as_text().ok_or_else(|| Error::RuleFailed {
            rule: "Sprints".to_string(),
            message: format!("sprint is not a name: {}", sprint),
        })?;
        if name.contains("Backlog") || name.contains("Bug Board") {
            return Ok(FieldValue::Null);
        }
        let number: i64 = name
            .rsplit(' ')
            .next()
            .unwrap_or_default()
            .parse()
            .map_err(|_| Error::RuleFailed {
                rule: "Sprints".to_string(),
                message: format!("sprint '{}' does not end in a number", name),
            })?;
        let id = number.checked_add(self.offset).ok_or_else(|| Error::RuleFailed {
            rule: "Sprints".to_string(),
            message: format!("sprint '{}' number is out of range", name),
        })?;
        Ok(FieldValue::from(id))
    }
}

fn description(value: &FieldValue, _: &FieldAccessor<'_>, _: &IssueAccessor<'_>) -> Result<RuleOutput> {
    Ok(RuleOutput::single("description", to_markup(value)))
}

fn comments(value: &FieldValue, _: &FieldAccessor<'_>, _: &IssueAccessor<'_>) -> Result<RuleOutput> {
    let converted = value.to_elements().iter().map(to_markup).collect();
    Ok(RuleOutput::single("comments", FieldValue::List(converted)))
}

/// Moves the deliverable links into an extra comment column.
///
/// Writes to `comments:0` so the converted comments are not overwritten.
fn task_deliverable_links(
    value: &FieldValue,
    _: &FieldAccessor<'_>,
    _: &IssueAccessor<'_>,
) -> Result<RuleOutput> {
    if value.is_null() {
        return Ok(RuleOutput::empty());
    }
    Ok(RuleOutput::single(
        "comments:0",
        format!(
            "Task Deliverable Links:\n{}",
            markdown_headings_to_markup(&value.to_cell())
        ),
    ))
}

fn to_markup(value: &FieldValue) -> FieldValue {
    match value {
        FieldValue::Text(text) => FieldValue::Text(markdown_headings_to_markup(text)),
        other => other.clone(),
    }
}
