// Rust guideline compliant 2026-10-18

//! Symmetric link fix-up.
//!
//! A symmetric relation such as "relates to" is reported on both issues of a
//! pair. Importing both halves would create the link twice, so one half is
//! dropped before rules run.

use crate::{FieldValue, IssueSet};
use tracing::warn;

/// The symmetric relation the source tracker reports on both ends.
pub const RELATES_TO: &str = "relates to";

/// Drops the mirrored half of each symmetric link pair.
///
/// Issues are visited in set order and updated in place, so an issue sees the
/// already-trimmed lists of the issues before it. The later issue of a pair
/// keeps the link. Visited relation values always become lists. Linked ids
/// missing from the set are kept with a warning.
///
/// # Arguments
///
/// * `issues` - The normalized issue set
/// * `relation` - The symmetric relation field name
///
/// # Returns
///
/// The number of link entries removed.
pub fn dedupe_symmetric_links(issues: &mut IssueSet, relation: &str) -> usize {
    let mut removed = 0;

    for position in 0..issues.len() {
        let Some(issue) = issues.get_index(position) else {
            continue;
        };
        let links = match issue.get(relation) {
            None | Some(FieldValue::Null) => continue,
            Some(value) => value.to_elements(),
        };
        let id = issue.id().unwrap_or_default().to_string();

        let before = links.len();
        let kept: Vec<FieldValue> = links
            .into_iter()
            .filter(|link| {
                let Some(target_id) = link.as_text() else {
                    return true;
                };
                match issues.get(target_id) {
                    Some(target) => !target
                        .get(relation)
                        .map(FieldValue::to_elements)
                        .unwrap_or_default()
                        .iter()
                        .any(|back| back.as_text() == Some(id.as_str())),
                    None => {
                        warn!(issue = %id, linked = %target_id, relation, "linked issue not in set; keeping link");
                        true
                    }
                }
            })
            .collect();
        removed += before - kept.len();

        if let Some(issue) = issues.get_index_mut(position) {
            issue.insert(relation, FieldValue::List(kept));
        }
    }

    removed
}
