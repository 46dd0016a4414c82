// Rust guideline compliant 2026-10-18

//! Field values carried by normalized issues.
//!
//! Source JSON is reduced to a small closed set of value shapes. Records are
//! kept ordered so that flattened column order follows the source.

use serde_json::{Number, Value};
use std::fmt;

/// A single field value on a normalized issue.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// Absent or explicitly empty value.
    #[default]
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Numeric value in JSON notation.
    Number(Number),
    /// Text value.
    Text(String),
    /// Ordered list of values, possibly nested.
    List(Vec<FieldValue>),
    /// Nested object left over from the source, in source key order.
    Record(Vec<(String, FieldValue)>),
}

impl FieldValue {
    /// Returns true if the value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Returns the text if the value is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the elements if the value is a list.
    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the value as a signed integer if it is an integral number.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().map(|float| float.trunc() as i64)),
            _ => None,
        }
    }

    /// Looks up a key on a record value.
    ///
    /// # Arguments
    ///
    /// * `key` - The record key
    ///
    /// # Returns
    ///
    /// The nested value, or None if this is not a record or the key is absent.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        match self {
            FieldValue::Record(entries) => entries
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Tests whether the value contains `needle`.
    ///
    /// Text values match on substring, list values match when any element is
    /// text equal to `needle`. Every other shape never matches.
    ///
    /// # Arguments
    ///
    /// * `needle` - The text to look for
    pub fn contains(&self, needle: &str) -> bool {
        match self {
            FieldValue::Text(text) => text.contains(needle),
            FieldValue::List(items) => items.iter().any(|item| item.as_text() == Some(needle)),
            _ => false,
        }
    }

    /// Returns the value viewed as a list of elements.
    ///
    /// Null is empty, lists are themselves and any other value is a one-element list.
    pub fn to_elements(&self) -> Vec<FieldValue> {
        match self {
            FieldValue::Null => Vec::new(),
            FieldValue::List(items) => items.clone(),
            other => vec![other.clone()],
        }
    }

    /// Converts the value back into JSON.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Bool(flag) => Value::Bool(*flag),
            FieldValue::Number(number) => Value::Number(number.clone()),
            FieldValue::Text(text) => Value::String(text.clone()),
            FieldValue::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            FieldValue::Record(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }

    /// Renders the value as a single CSV cell.
    ///
    /// Null renders empty, booleans as `true`/`false` and nested structures as compact JSON.
    pub fn to_cell(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Bool(flag) => flag.to_string(),
            FieldValue::Number(number) => number.to_string(),
            FieldValue::Text(text) => text.clone(),
            FieldValue::List(_) | FieldValue::Record(_) => self.to_json().to_string(),
        }
    }

    /// Collapses a list produced by a multi-valued unpacker.
    ///
    /// One element becomes the bare element, no elements become null.
    pub fn collapse(mut items: Vec<FieldValue>) -> FieldValue {
        match items.len() {
            0 => FieldValue::Null,
            1 => items.remove(0),
            _ => FieldValue::List(items),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(flag) => FieldValue::Bool(flag),
            Value::Number(number) => FieldValue::Number(number),
            Value::String(text) => FieldValue::Text(text),
            Value::Array(items) => {
                FieldValue::List(items.into_iter().map(FieldValue::from).collect())
            }
            Value::Object(map) => FieldValue::Record(
                map.into_iter()
                    .map(|(key, value)| (key, FieldValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<bool> for FieldValue {
    fn from(flag: bool) -> Self {
        FieldValue::Bool(flag)
    }
}

impl From<i64> for FieldValue {
    fn from(number: i64) -> Self {
        FieldValue::Number(number.into())
    }
}

impl From<i32> for FieldValue {
    fn from(number: i32) -> Self {
        FieldValue::Number(number.into())
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(items: Vec<FieldValue>) -> Self {
        FieldValue::List(items)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_cell())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_keeps_record_order() {
        let value = FieldValue::from(json!({"zeta": 1, "alpha": "a"}));
        match value {
            FieldValue::Record(entries) => {
                let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
                assert_eq!(keys, vec!["zeta", "alpha"]);
            }
            other => panic!("expected record, got {:?}", other),
        }
    }

    #[test]
    fn test_contains_text_is_substring() {
        let value = FieldValue::from("User Story");
        assert!(value.contains("Story"));
        assert!(!value.contains("Epic"));
    }

    #[test]
    fn test_contains_list_is_element_equality() {
        let value = FieldValue::List(vec!["Feature".into(), "Bug".into()]);
        assert!(value.contains("Feature"));
        assert!(!value.contains("Feat"));
    }

    #[test]
    fn test_contains_null_never_matches() {
        assert!(!FieldValue::Null.contains(""));
    }

    #[test]
    fn test_collapse() {
        assert_eq!(FieldValue::collapse(vec![]), FieldValue::Null);
        assert_eq!(FieldValue::collapse(vec!["a".into()]), FieldValue::from("a"));
        assert_eq!(
            FieldValue::collapse(vec!["a".into(), "b".into()]),
            FieldValue::List(vec!["a".into(), "b".into()])
        );
    }

    #[test]
    fn test_to_cell() {
        assert_eq!(FieldValue::Null.to_cell(), "");
        assert_eq!(FieldValue::Bool(true).to_cell(), "true");
        assert_eq!(FieldValue::from(42).to_cell(), "42");
        assert_eq!(
            FieldValue::List(vec![FieldValue::from(8), FieldValue::Null]).to_cell(),
            "[8,null]"
        );
    }

    #[test]
    fn test_as_i64_truncates_floats() {
        let value = FieldValue::from(json!(1500.9));
        assert_eq!(value.as_i64(), Some(1500));
    }
}
