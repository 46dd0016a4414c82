// Rust guideline compliant 2026-10-18

//! Trackshift Core Library
//!
//! This crate provides the conversion engine behind Trackshift, which moves
//! YouTrack issues into the Jira CSV importer format:
//! - Data models (Issue, IssueSet, RawIssueSet, FieldValue)
//! - Custom field and link group unpacking
//! - Issue normalization and symmetric link fix-up
//! - Parent-chain hierarchy resolution
//! - Rule engine with a built-in rule catalog
//! - Tabular flattening and CSV output
//! - Configuration, per-project storage and error types

pub mod accessor;
pub mod builtin;
pub mod config;
pub mod error;
pub mod flatten;
pub mod hierarchy;
pub mod markup;
pub mod models;
pub mod naming;
pub mod normalize;
pub mod pipeline;
pub mod relations;
pub mod rules;
pub mod storage;
pub mod time;
pub mod unpack;
pub mod value;

pub use accessor::{FieldAccessor, IssueAccessor};
pub use builtin::builtin_registry;
pub use config::{Config, RuleSettings};
pub use error::{Error, Result};
pub use flatten::{flatten, write_csv, FlatTable};
pub use hierarchy::{resolve_parent_chain, RelationshipTriple};
pub use models::{Issue, IssueSet, RawIssueSet, ID_FIELD};
pub use normalize::{normalize, normalize_all};
pub use pipeline::{convert_issues, convert_project, ConversionReport, ConversionStats};
pub use rules::{apply_rules, DeletePredicate, FieldRule, RuleOutput, RuleRegistry};
pub use storage::Storage;
pub use time::Timezone;
pub use unpack::{unpack_field, unpack_links};
pub use value::FieldValue;
