// Rust guideline compliant 2026-10-18

//! Field transformation rules.
//!
//! A rule is bound to one field by name and rewrites it into one or more
//! output columns. Rules run in registration order against an unmodified
//! snapshot of the input issue; their outputs are merged into a copy, later
//! writes winning. An optional deletion predicate runs first and drops the
//! issue outright.

use crate::naming::{demangle_rule_name, mangle_rule_name};
use crate::{Error, FieldAccessor, FieldValue, Issue, IssueAccessor, IssueSet, Result};
use tracing::debug;

/// Name reserved for the deletion predicate.
pub const DELETE_IF: &str = "DELETE_IF";

/// Columns and values produced by one rule invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutput {
    /// One column and its value.
    Single(String, FieldValue),
    /// Parallel lists of columns and values; lengths must match.
    Many(Vec<String>, Vec<FieldValue>),
}

impl RuleOutput {
    /// Creates a single-column output.
    pub fn single(name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        RuleOutput::Single(name.into(), value.into())
    }

    /// Creates an output that writes nothing; the source field is still removed.
    pub fn empty() -> Self {
        RuleOutput::Many(Vec::new(), Vec::new())
    }

    /// Pairs columns with values.
    ///
    /// # Errors
    ///
    /// Returns `RuleArityMismatch` naming `rule` if the lists differ in length.
    pub fn into_pairs(self, rule: &str) -> Result<Vec<(String, FieldValue)>> {
        match self {
            RuleOutput::Single(name, value) => Ok(vec![(name, value)]),
            RuleOutput::Many(names, values) => {
                if names.len() != values.len() {
                    return Err(Error::RuleArityMismatch {
                        rule: rule.to_string(),
                        names: names.len(),
                        values: values.len(),
                    });
                }
                Ok(names.into_iter().zip(values).collect())
            }
        }
    }
}

/// A transformation bound to one field.
pub trait FieldRule {
    /// Rewrites the field's value.
    ///
    /// # Arguments
    ///
    /// * `value` - The field's value on the input issue
    /// * `fields` - Lookup over the input issue's other fields
    /// * `issues` - Lookup over the whole issue set
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be transformed.
    fn apply(
        &self,
        value: &FieldValue,
        fields: &FieldAccessor<'_>,
        issues: &IssueAccessor<'_>,
    ) -> Result<RuleOutput>;
}

impl<F> FieldRule for F
where
    F: Fn(&FieldValue, &FieldAccessor<'_>, &IssueAccessor<'_>) -> Result<RuleOutput>,
{
    fn apply(
        &self,
        value: &FieldValue,
        fields: &FieldAccessor<'_>,
        issues: &IssueAccessor<'_>,
    ) -> Result<RuleOutput> {
        self(value, fields, issues)
    }
}

/// A predicate deciding whether an issue is dropped from the output.
pub trait DeletePredicate {
    /// Returns true if the issue should be deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the predicate cannot be evaluated.
    fn should_delete(&self, fields: &FieldAccessor<'_>, issues: &IssueAccessor<'_>) -> Result<bool>;
}

impl<F> DeletePredicate for F
where
    F: Fn(&FieldAccessor<'_>, &IssueAccessor<'_>) -> Result<bool>,
{
    fn should_delete(&self, fields: &FieldAccessor<'_>, issues: &IssueAccessor<'_>) -> Result<bool> {
        self(fields, issues)
    }
}

struct RegisteredRule {
    name: String,
    field: String,
    rule: Box<dyn FieldRule>,
}

/// Ordered set of rules for one conversion run.
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<RegisteredRule>,
    delete_if: Option<Box<dyn DeletePredicate>>,
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.rule_names())
            .field("delete_if", &self.delete_if.is_some())
            .finish()
    }
}

impl RuleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule under its mangled name.
    ///
    /// The rule applies to the field named by demangling `rule_name`, so
    /// `subtask_of` targets `subtask of`.
    ///
    /// # Arguments
    ///
    /// * `rule_name` - The mangled rule name
    /// * `rule` - The transformation
    pub fn register(&mut self, rule_name: &str, rule: impl FieldRule + 'static) -> &mut Self {
        self.rules.push(RegisteredRule {
            name: rule_name.to_string(),
            field: demangle_rule_name(rule_name),
            rule: Box::new(rule),
        });
        self
    }

    /// Registers a rule directly by field name.
    pub fn register_field(&mut self, field_name: &str, rule: impl FieldRule + 'static) -> &mut Self {
        self.rules.push(RegisteredRule {
            name: mangle_rule_name(field_name),
            field: field_name.to_string(),
            rule: Box::new(rule),
        });
        self
    }

    /// Sets the deletion predicate, replacing any previous one.
    pub fn set_delete_if(&mut self, predicate: impl DeletePredicate + 'static) -> &mut Self {
        self.delete_if = Some(Box::new(predicate));
        self
    }

    /// Returns rule names in execution order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|entry| entry.name.as_str()).collect()
    }

    /// Returns true if a deletion predicate is set.
    pub fn has_delete_if(&self) -> bool {
        self.delete_if.is_some()
    }

    /// Returns the number of field rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if there are no field rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Applies the registry to one issue.
///
/// The deletion predicate runs first; if it fires no rule runs. Otherwise
/// every rule whose field exists on the input issue runs against the input
/// snapshot, its source field is removed from the output and its columns
/// are written in order.
///
/// # Arguments
///
/// * `issue` - The input issue
/// * `issues` - The whole issue set, for cross-issue lookups
/// * `registry` - The rules to apply
///
/// # Returns
///
/// The transformed issue, or None if it was deleted.
///
/// # Errors
///
/// Returns the first error raised by the predicate or a rule, or
/// `RuleArityMismatch` for an output whose lists differ in length.
pub fn apply_rules(issue: &Issue, issues: &IssueSet, registry: &RuleRegistry) -> Result<Option<Issue>> {
    let fields = FieldAccessor::new(issue);
    let lookup = IssueAccessor::new(issues);

    if let Some(predicate) = &registry.delete_if {
        if predicate.should_delete(&fields, &lookup)? {
            debug!(issue = issue.id().unwrap_or_default(), "deleted by {}", DELETE_IF);
            return Ok(None);
        }
    }

    let mut output = issue.clone();
    for entry in &registry.rules {
        let Some(value) = issue.get(&entry.field) else {
            continue;
        };
        let pairs = entry
            .rule
            .apply(value, &fields, &lookup)?
            .into_pairs(&entry.name)?;
        output.remove(&entry.field);
        for (column, value) in pairs {
            output.insert(column, value);
        }
    }

    Ok(Some(output))
}

/// Applies the registry to every issue of a set, in order.
///
/// # Returns
///
/// The surviving transformed issues.
///
/// # Errors
///
/// Returns the first rule error encountered.
pub fn apply_rules_to_set(issues: &IssueSet, registry: &RuleRegistry) -> Result<Vec<Issue>> {
    let mut processed = Vec::with_capacity(issues.len());
    for issue in issues {
        if let Some(result) = apply_rules(issue, issues, registry)? {
            processed.push(result);
        }
    }
    Ok(processed)
}
