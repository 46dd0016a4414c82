// Rust guideline compliant 2026-10-18

//! Markdown heading conversion for the importer's wiki markup.

use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Deepest heading level the markup supports.
const MAX_HEADING_LEVEL: usize = 6;

fn heading_re() -> &'static Regex {
    static HEADING_RE: OnceLock<Regex> = OnceLock::new();
    HEADING_RE.get_or_init(|| Regex::new(r"(?m)^#+").expect("valid heading regex"))
}

/// Converts Markdown headings (`#` to `######`) at line starts into `h1.` to `h6.`.
///
/// Runs of more than six `#` are left as they are. Nothing else is converted.
///
/// # Examples
///
/// ```
/// use trackshift_core::markup::markdown_headings_to_markup;
/// assert_eq!(markdown_headings_to_markup("## Plan\ntext"), "h2. Plan\ntext");
/// ```
pub fn markdown_headings_to_markup(text: &str) -> String {
    heading_re()
        .replace_all(text, |caps: &Captures<'_>| {
            let run = &caps[0];
            if run.len() <= MAX_HEADING_LEVEL {
                format!("h{}.", run.len())
            } else {
                run.to_string()
            }
        })
        .into_owned()
}
