// Rust guideline compliant 2026-10-18

//! Unpacking of polymorphic custom fields and link groups.
//!
//! Every custom field record carries a `$type` tag naming one of a closed set
//! of kinds. Each kind stores its effective value in a different nested shape;
//! this module reduces them all to a single `(name, value)` pair.

use crate::{Error, FieldValue, Result};
use serde_json::Value;

/// The custom field kinds the unpacker understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Plain scalar value.
    Simple,
    /// Workflow state with a `name`.
    State,
    /// State-machine state; a `StateBundleElement` exposes its `name`.
    StateMachine,
    /// Rich text with a `text` body.
    Text,
    /// Duration with a `minutes` count.
    Period,
    /// Single enum element with a `name`.
    SingleEnum,
    /// List of enum elements.
    MultiEnum,
    /// List of users; banned users are dropped.
    MultiUser,
    /// List of version elements.
    MultiVersion,
}

impl FieldKind {
    /// Resolves a `$type` tag such as `MultiUserIssueCustomField`.
    ///
    /// # Returns
    ///
    /// The matching kind, or None for an unknown tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let kind = match tag {
            "SimpleIssueCustomField" => FieldKind::Simple,
            "StateIssueCustomField" => FieldKind::State,
            "StateMachineIssueCustomField" => FieldKind::StateMachine,
            "TextIssueCustomField" => FieldKind::Text,
            "PeriodIssueCustomField" => FieldKind::Period,
            "SingleEnumIssueCustomField" => FieldKind::SingleEnum,
            "MultiEnumIssueCustomField" => FieldKind::MultiEnum,
            "MultiUserIssueCustomField" => FieldKind::MultiUser,
            "MultiVersionIssueCustomField" => FieldKind::MultiVersion,
            _ => return None,
        };
        Some(kind)
    }
}

/// Unpacks one custom field record into its name and effective value.
///
/// A null value yields `(name, Null)` whatever the tag. Multi-valued kinds
/// collapse: one element becomes a scalar, none becomes null.
///
/// # Arguments
///
/// * `field` - The raw custom field record
///
/// # Returns
///
/// The field's display name and its unpacked value.
///
/// # Errors
///
/// Returns an error if:
/// - The record has no textual `name`
/// - The `$type` tag is not a known kind
/// - The value does not have the shape its kind requires
pub fn unpack_field(field: &Value) -> Result<(String, FieldValue)> {
    let name = field
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::MalformedIssue("custom field without name".to_string()))?
        .to_string();

    let value = match field.get("value") {
        None | Some(Value::Null) => return Ok((name, FieldValue::Null)),
        Some(value) => value,
    };

    let tag = field.get("$type").and_then(Value::as_str).unwrap_or_default();
    let kind = FieldKind::from_tag(tag).ok_or_else(|| Error::UnsupportedFieldType {
        tag: tag.to_string(),
        field: name.clone(),
    })?;

    let unpacked = match kind {
        FieldKind::Simple => FieldValue::from(value.clone()),
        FieldKind::State | FieldKind::SingleEnum => member(value, "name", &name)?,
        FieldKind::StateMachine => {
            if value.get("$type").and_then(Value::as_str) == Some("StateBundleElement") {
                member(value, "name", &name)?
            } else {
                FieldValue::from(value.clone())
            }
        }
        FieldKind::Text => member(value, "text", &name)?,
        FieldKind::Period => {
            let minutes = value
                .get("minutes")
                .and_then(Value::as_i64)
                .ok_or_else(|| shape_error(&name, "minutes"))?;
            let seconds = minutes
                .checked_mul(60)
                .ok_or_else(|| Error::MalformedIssue(format!("field '{}' period is out of range", name)))?;
            FieldValue::from(seconds)
        }
        FieldKind::MultiEnum | FieldKind::MultiVersion => {
            let names = elements(value, &name)?
                .iter()
                .map(|item| member(item, "name", &name))
                .collect::<Result<Vec<_>>>()?;
            FieldValue::collapse(names)
        }
        FieldKind::MultiUser => {
            let emails = elements(value, &name)?
                .iter()
                .filter_map(active_email)
                .collect();
            FieldValue::collapse(emails)
        }
    };

    Ok((name, unpacked))
}

/// Unpacks a link group into its direction-appropriate name and linked ids.
///
/// Groups whose direction contains `INWARD` use the target-to-source name;
/// all others use source-to-target.
///
/// # Arguments
///
/// * `group` - The raw link group record
///
/// # Returns
///
/// The relationship name, and null, a single id or the ids in source order.
///
/// # Errors
///
/// Returns an error if the direction, link type names or linked issues are missing.
pub fn unpack_links(group: &Value) -> Result<(String, FieldValue)> {
    let direction = group
        .get("direction")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::MalformedIssue("link group without direction".to_string()))?;
    let naming = if direction.contains("INWARD") {
        "targetToSource"
    } else {
        "sourceToTarget"
    };
    let relation = group
        .get("linkType")
        .and_then(|link_type| link_type.get(naming))
        .and_then(Value::as_str)
        .ok_or_else(|| Error::MalformedIssue(format!("link group without {}", naming)))?
        .to_string();

    let ids = group
        .get("issues")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::MalformedIssue(format!("link group '{}' without issues", relation)))?
        .iter()
        .map(|linked| {
            linked
                .get("idReadable")
                .and_then(Value::as_str)
                .map(FieldValue::from)
                .ok_or_else(|| {
                    Error::MalformedIssue(format!("linked issue without id in '{}'", relation))
                })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((relation, FieldValue::collapse(ids)))
}

/// Returns a user's email unless the user is banned.
///
/// A missing `banned` flag counts as active.
pub(crate) fn active_email(user: &Value) -> Option<FieldValue> {
    if user.get("banned").and_then(Value::as_bool) == Some(true) {
        return None;
    }
    Some(FieldValue::from(user.get("email").cloned().unwrap_or(Value::Null)))
}

fn member(value: &Value, key: &str, field: &str) -> Result<FieldValue> {
    value
        .get(key)
        .cloned()
        .map(FieldValue::from)
        .ok_or_else(|| shape_error(field, key))
}

fn elements<'a>(value: &'a Value, field: &str) -> Result<&'a Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| Error::MalformedIssue(format!("field '{}' expected a list", field)))
}

fn shape_error(field: &str, key: &str) -> Error {
    Error::MalformedIssue(format!("field '{}' value has no '{}'", field, key))
}
