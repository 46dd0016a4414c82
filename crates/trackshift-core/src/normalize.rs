// Rust guideline compliant 2026-10-18

//! Issue normalization.
//!
//! Turns one raw source record into a flat [`Issue`]: timestamps become date
//! strings, users become emails, custom fields and link groups are folded into
//! top-level fields, and tags, comments and worklogs become lists of strings.

use crate::time::{format_timestamp, Timezone};
use crate::unpack::{active_email, unpack_field, unpack_links};
use crate::{Error, FieldValue, Issue, IssueSet, RawIssueSet, Result, ID_FIELD};
use serde_json::Value;
use tracing::debug;

/// Worklog dates are shifted forward one day on export.
const WORKLOG_DATE_SHIFT_MS: i64 = 24 * 3600 * 1000;

/// Worklog label used when the work item has no type.
const NO_WORKTYPE: &str = "No Worktype";

/// Normalizes one raw issue record.
///
/// Field order follows the source record; folded custom fields and link
/// groups are appended after it, then any missing `tags`, `comments` and
/// `worklogs` lists.
///
/// # Arguments
///
/// * `raw` - The raw issue record, consumed
/// * `timezone` - Timezone used to render dates
///
/// # Returns
///
/// The normalized issue.
///
/// # Errors
///
/// Returns an error if:
/// - The record is not a JSON object
/// - A custom field has an unsupported type or malformed value
/// - A link group, comment or worklog is malformed
/// - A timestamp is not a number
pub fn normalize(raw: Value, timezone: Timezone) -> Result<Issue> {
    let record = match raw {
        Value::Object(record) => record,
        _ => return Err(Error::MalformedIssue("issue record must be an object".to_string())),
    };

    let mut issue = Issue::new();
    let mut custom_fields = Vec::new();
    let mut link_groups = Vec::new();

    for (key, value) in record {
        match key.as_str() {
            "customFields" => custom_fields = list_of(value, &key)?,
            "links" => link_groups = list_of(value, &key)?,
            "created" | "updated" | "resolved" => {
                let date = render_timestamp(&value, &key, timezone)?;
                issue.insert(key, date);
            }
            "reporter" | "updater" => {
                issue.insert(key, active_email(&value).unwrap_or(FieldValue::Null));
            }
            "tags" => {
                let tags = unpack_tags(&value)?;
                issue.insert(key, tags);
            }
            "comments" => {
                let comments = unpack_comments(&value, timezone)?;
                issue.insert(key, comments);
            }
            "worklogs" => {
                let worklogs = unpack_worklogs(&value, timezone)?;
                issue.insert(key, worklogs);
            }
            _ => {
                issue.insert(key, FieldValue::from(value));
            }
        }
    }

    for field in &custom_fields {
        let (name, value) = unpack_field(field)?;
        issue.insert(name, value);
    }

    for group in &link_groups {
        let (relation, ids) = unpack_links(group)?;
        issue.insert(relation, ids);
    }

    for list_field in ["tags", "comments", "worklogs"] {
        if !issue.contains_key(list_field) {
            issue.insert(list_field, FieldValue::List(Vec::new()));
        }
    }

    Ok(issue)
}

/// Normalizes a whole raw issue set in source order.
///
/// Records missing `idReadable` take their key in the raw set as id.
///
/// # Arguments
///
/// * `raw` - The raw issue set, consumed
/// * `timezone` - Timezone used to render dates
///
/// # Returns
///
/// The normalized issue set.
///
/// # Errors
///
/// Returns the first normalization error encountered.
pub fn normalize_all(raw: RawIssueSet, timezone: Timezone) -> Result<IssueSet> {
    let mut issues = IssueSet::new();
    for (id, record) in raw {
        let mut issue = normalize(record, timezone)?;
        if issue.id().is_none() {
            issue.insert(ID_FIELD, FieldValue::from(id.as_str()));
        }
        debug!(issue = %id, fields = issue.len(), "normalized issue");
        issues.push(issue)?;
    }
    Ok(issues)
}

fn list_of(value: Value, key: &str) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Null => Ok(Vec::new()),
        _ => Err(Error::MalformedIssue(format!("'{}' must be a list", key))),
    }
}

fn render_timestamp(value: &Value, key: &str, timezone: Timezone) -> Result<FieldValue> {
    if value.is_null() {
        return Ok(FieldValue::Null);
    }
    let millis = timestamp_millis(value)
        .ok_or_else(|| Error::MalformedIssue(format!("'{}' is not a timestamp", key)))?;
    Ok(FieldValue::Text(format_timestamp(millis, timezone)?))
}

fn timestamp_millis(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|millis| millis.trunc() as i64))
}

fn unpack_tags(value: &Value) -> Result<FieldValue> {
    let tags = value
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .map(|tag| {
            tag.get("name")
                .and_then(Value::as_str)
                .map(|name| FieldValue::Text(name.replace(' ', "-")))
                .ok_or_else(|| Error::MalformedIssue("tag without name".to_string()))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(FieldValue::List(tags))
}

fn unpack_comments(value: &Value, timezone: Timezone) -> Result<FieldValue> {
    let mut comments = Vec::new();
    for comment in value.as_array().map(Vec::as_slice).unwrap_or_default() {
        let created = comment
            .get("created")
            .and_then(timestamp_millis)
            .ok_or_else(|| Error::MalformedIssue("comment without created".to_string()))?;
        let author = comment.get("author").unwrap_or(&Value::Null);
        comments.push(FieldValue::Text(format!(
            "{}; {}; {}: \n{}",
            format_timestamp(created, timezone)?,
            author_email(author),
            text_at(author, "fullName"),
            text_at(comment, "text"),
        )));
    }
    Ok(FieldValue::List(comments))
}

fn unpack_worklogs(value: &Value, timezone: Timezone) -> Result<FieldValue> {
    let mut worklogs = Vec::new();
    for log in value.as_array().map(Vec::as_slice).unwrap_or_default() {
        let creator = log.get("creator").unwrap_or(&Value::Null);
        let worktype = log
            .get("type")
            .and_then(|kind| kind.get("name"))
            .and_then(Value::as_str)
            .unwrap_or(NO_WORKTYPE);
        let date = log
            .get("date")
            .and_then(timestamp_millis)
            .ok_or_else(|| Error::MalformedIssue("worklog without date".to_string()))?;
        let minutes = log
            .get("duration")
            .and_then(|duration| duration.get("minutes"))
            .and_then(Value::as_i64)
            .ok_or_else(|| Error::MalformedIssue("worklog without duration".to_string()))?;
        let shifted = date
            .checked_add(WORKLOG_DATE_SHIFT_MS)
            .ok_or_else(|| Error::MalformedIssue(format!("worklog date {} is out of range", date)))?;
        let seconds = minutes
            .checked_mul(60)
            .ok_or_else(|| Error::MalformedIssue(format!("worklog duration {} is out of range", minutes)))?;
        worklogs.push(FieldValue::Text(format!(
            "{} [{}]: {};{};{};{}",
            text_at(creator, "fullName"),
            worktype,
            text_at(log, "text"),
            format_timestamp(shifted, timezone)?,
            author_email(creator),
            seconds,
        )));
    }
    Ok(FieldValue::List(worklogs))
}

/// Email of a comment or worklog author; banned authors render empty.
fn author_email(author: &Value) -> String {
    active_email(author)
        .map(|email| email.to_cell())
        .unwrap_or_default()
}

fn text_at(value: &Value, key: &str) -> String {
    value
        .get(key)
        .cloned()
        .map(|text| FieldValue::from(text).to_cell())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_issue() -> Value {
        json!({
            "idReadable": "P-1",
            "summary": "First",
            "created": 1_600_000_000_000i64,
            "updated": 1_600_000_060_000i64,
            "resolved": null,
            "reporter": {"email": "rep@example.com", "banned": false},
            "updater": {"email": "old@example.com", "banned": true},
            "customFields": [
                {"$type": "SingleEnumIssueCustomField", "name": "Type", "value": {"name": "Task"}},
                {"$type": "PeriodIssueCustomField", "name": "Estimation", "value": {"minutes": 2}}
            ],
            "links": [{
                "direction": "INWARD",
                "linkType": {"sourceToTarget": "parent for", "targetToSource": "subtask of"},
                "issues": [{"idReadable": "P-0"}]
            }],
            "tags": [{"name": "needs review"}]
        })
    }

    #[test]
    fn test_normalize_core_fields() {
        let issue = normalize(raw_issue(), Timezone::Utc).unwrap();
        assert_eq!(issue.get("created"), Some(&FieldValue::from("09/13/2020 12:26:40")));
        assert_eq!(issue.get("updated"), Some(&FieldValue::from("09/13/2020 12:27:40")));
        assert_eq!(issue.get("resolved"), Some(&FieldValue::Null));
        assert_eq!(issue.get("reporter"), Some(&FieldValue::from("rep@example.com")));
        assert_eq!(issue.get("updater"), Some(&FieldValue::Null));
    }

    #[test]
    fn test_normalize_folds_fields_and_links() {
        let issue = normalize(raw_issue(), Timezone::Utc).unwrap();
        assert!(!issue.contains_key("customFields"));
        assert!(!issue.contains_key("links"));
        assert_eq!(issue.get("Type"), Some(&FieldValue::from("Task")));
        assert_eq!(issue.get("Estimation"), Some(&FieldValue::from(120)));
        assert_eq!(issue.get("subtask of"), Some(&FieldValue::from("P-0")));
    }

    #[test]
    fn test_normalize_field_order() {
        let issue = normalize(raw_issue(), Timezone::Utc).unwrap();
        let keys: Vec<_> = issue.keys().collect();
        assert_eq!(
            keys,
            vec![
                "idReadable", "summary", "created", "updated", "resolved", "reporter",
                "updater", "tags", "Type", "Estimation", "subtask of", "comments", "worklogs"
            ]
        );
    }

    #[test]
    fn test_normalize_tags_and_missing_lists() {
        let issue = normalize(raw_issue(), Timezone::Utc).unwrap();
        assert_eq!(
            issue.get("tags"),
            Some(&FieldValue::List(vec!["needs-review".into()]))
        );
        assert_eq!(issue.get("comments"), Some(&FieldValue::List(vec![])));
        assert_eq!(issue.get("worklogs"), Some(&FieldValue::List(vec![])));
    }

    #[test]
    fn test_normalize_comments() {
        let raw = json!({
            "idReadable": "P-1",
            "comments": [
                {
                    "created": 1_600_000_000_000i64,
                    "text": "Looks good",
                    "author": {"email": "a@example.com", "fullName": "Ann", "banned": false}
                },
                {
                    "created": 1_600_000_000_000i64,
                    "text": "Gone",
                    "author": {"email": "b@example.com", "fullName": "Bob", "banned": true}
                }
            ]
        });
        let issue = normalize(raw, Timezone::Utc).unwrap();
        assert_eq!(
            issue.get("comments"),
            Some(&FieldValue::List(vec![
                "09/13/2020 12:26:40; a@example.com; Ann: \nLooks good".into(),
                "09/13/2020 12:26:40; ; Bob: \nGone".into(),
            ]))
        );
    }

    #[test]
    fn test_normalize_worklogs_shift_date_one_day() {
        let raw = json!({
            "idReadable": "P-1",
            "worklogs": [
                {
                    "creator": {"email": "a@example.com", "fullName": "Ann", "banned": false},
                    "type": {"name": "Development"},
                    "text": "coding",
                    "date": 1_600_000_000_000i64,
                    "duration": {"minutes": 30}
                },
                {
                    "creator": {"email": "b@example.com", "fullName": "Bob", "banned": true},
                    "type": null,
                    "text": "review",
                    "date": 1_600_000_000_000i64,
                    "duration": {"minutes": 1}
                }
            ]
        });
        let issue = normalize(raw, Timezone::Utc).unwrap();
        assert_eq!(
            issue.get("worklogs"),
            Some(&FieldValue::List(vec![
                "Ann [Development]: coding;09/14/2020 12:26:40;a@example.com;1800".into(),
                "Bob [No Worktype]: review;09/14/2020 12:26:40;;60".into(),
            ]))
        );
    }

    fn worklog(date: i64, minutes: i64) -> Value {
        json!({
            "idReadable": "P-1",
            "worklogs": [{
                "creator": {"email": "a@example.com", "fullName": "Ann"},
                "text": "coding",
                "date": date,
                "duration": {"minutes": minutes}
            }]
        })
    }

    #[test]
    fn test_normalize_worklog_date_out_of_range() {
        assert!(matches!(
            normalize(worklog(i64::MAX, 30), Timezone::Utc),
            Err(Error::MalformedIssue(_))
        ));
    }

    #[test]
    fn test_normalize_worklog_duration_out_of_range() {
        assert!(matches!(
            normalize(worklog(1_600_000_000_000, 1i64 << 60), Timezone::Utc),
            Err(Error::MalformedIssue(_))
        ));
    }

    #[test]
    fn test_normalize_unknown_field_type_fails() {
        let raw = json!({
            "idReadable": "P-1",
            "customFields": [{"$type": "WeirdIssueCustomField", "name": "X", "value": 1}]
        });
        assert!(matches!(
            normalize(raw, Timezone::Utc),
            Err(Error::UnsupportedFieldType { .. })
        ));
    }

    #[test]
    fn test_normalize_rejects_bad_timestamp() {
        let raw = json!({"idReadable": "P-1", "created": "yesterday"});
        assert!(matches!(
            normalize(raw, Timezone::Utc),
            Err(Error::MalformedIssue(_))
        ));
    }

    #[test]
    fn test_normalize_rejects_non_object() {
        assert!(normalize(json!([1, 2]), Timezone::Utc).is_err());
    }

    #[test]
    fn test_normalize_all_keeps_order_and_fills_ids() {
        let raw = RawIssueSet::from_json_str(r#"{"P-2": {"summary": "b"}, "P-1": {"idReadable": "P-1"}}"#)
            .unwrap();
        let issues = normalize_all(raw, Timezone::Utc).unwrap();
        let ids: Vec<_> = issues.iter().filter_map(Issue::id).collect();
        assert_eq!(ids, vec!["P-2", "P-1"]);
    }
}
