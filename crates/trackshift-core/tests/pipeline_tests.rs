// Rust guideline compliant 2026-10-18

//! Integration tests for the conversion pipeline.
//!
//! These tests drive a whole project from a cached issue file to the CSV file.

use serde_json::json;
use tempfile::TempDir;
use trackshift_core::{convert_project, Config, RawIssueSet, Storage, Timezone};

fn cached_project() -> serde_json::Value {
    json!({
        "DEMO-1": {
            "id": "2-1",
            "idReadable": "DEMO-1",
            "summary": "Checkout",
            "created": 1_600_000_000_000i64,
            "updated": 1_600_000_000_000i64,
            "resolved": null,
            "reporter": {"email": "lead@example.com", "banned": false},
            "updater": {"email": "lead@example.com", "banned": false},
            "customFields": [
                {"$type": "SingleEnumIssueCustomField", "name": "Type", "value": {"name": "Epic"}}
            ],
            "links": []
        },
        "DEMO-2": {
            "id": "2-2",
            "idReadable": "DEMO-2",
            "summary": "Payments",
            "created": 1_600_000_000_000i64,
            "updated": 1_600_000_000_000i64,
            "resolved": null,
            "reporter": {"email": "lead@example.com", "banned": false},
            "updater": {"email": "lead@example.com", "banned": false},
            "customFields": [
                {"$type": "SingleEnumIssueCustomField", "name": "Type", "value": {"name": "Feature"}}
            ],
            "links": [{
                "direction": "INWARD",
                "linkType": {"sourceToTarget": "parent for", "targetToSource": "subtask of"},
                "issues": [{"idReadable": "DEMO-1"}]
            }]
        },
        "DEMO-3": {
            "id": "2-3",
            "idReadable": "DEMO-3",
            "summary": "Card form",
            "description": "# Scope\nCards only",
            "created": 1_600_000_000_000i64,
            "updated": 1_600_000_000_000i64,
            "resolved": 1_600_086_400_000i64,
            "reporter": {"email": "gone@example.com", "banned": true},
            "updater": {"email": "dev@example.com", "banned": false},
            "customFields": [
                {"$type": "SingleEnumIssueCustomField", "name": "Type", "value": {"name": "User Story"}},
                {
                    "$type": "MultiUserIssueCustomField",
                    "name": "Assignees",
                    "value": [
                        {"email": "dev@example.com", "banned": false},
                        {"email": "qa@example.com", "banned": false}
                    ]
                },
                {
                    "$type": "MultiEnumIssueCustomField",
                    "name": "Sprints",
                    "value": [{"name": "Sprint 4"}]
                },
                {
                    "$type": "TextIssueCustomField",
                    "name": "Task Deliverable Links",
                    "value": {"text": "## Spec"}
                }
            ],
            "links": [{
                "direction": "INWARD",
                "linkType": {"sourceToTarget": "parent for", "targetToSource": "subtask of"},
                "issues": [{"idReadable": "DEMO-2"}]
            }],
            "comments": [{
                "created": 1_600_000_000_000i64,
                "text": "### Done",
                "author": {"email": "gone@example.com", "fullName": "Gone User", "banned": true}
            }],
            "worklogs": [{
                "creator": {"email": "dev@example.com", "fullName": "Dev", "banned": false},
                "type": null,
                "text": "impl",
                "date": 1_600_000_000_000i64,
                "duration": {"minutes": 45}
            }]
        }
    })
}

fn setup() -> (TempDir, Storage, Config) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config {
        project_name: "DEMO".to_string(),
        data_storage_path: temp_dir.path().to_path_buf(),
        timezone: Timezone::Utc,
        ..Config::default()
    };
    let storage = Storage::from_config(&config).unwrap();
    let raw = RawIssueSet::from_value(cached_project()).unwrap();
    storage.save_issues(&raw).unwrap();
    (temp_dir, storage, config)
}

fn read_csv(path: &std::path::Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader.headers().unwrap().iter().map(String::from).collect();
    let rows = reader
        .records()
        .map(|record| record.unwrap().iter().map(String::from).collect())
        .collect();
    (headers, rows)
}

fn column<'a>(headers: &[String], row: &'a [String], name: &str) -> Vec<&'a str> {
    headers
        .iter()
        .zip(row)
        .filter(|(header, _)| header.as_str() == name)
        .map(|(_, cell)| cell.as_str())
        .collect()
}

#[test]
fn test_convert_from_cache_file() {
    let (_temp_dir, storage, config) = setup();
    let raw = storage.load_issues().unwrap();
    let report = convert_project(raw, &storage, &config).unwrap();

    assert_eq!(report.stats.issues_read, 3);
    assert_eq!(report.stats.issues_deleted, 1);
    assert_eq!(report.stats.rows, 2);
    assert!(report.output_path.ends_with("DEMO/DEMO_jira_issues.csv"));

    let (headers, rows) = read_csv(&report.output_path);
    assert_eq!(rows.len(), 2);
    assert!(headers.iter().all(|header| !header.contains(':')));
}

#[test]
fn test_feature_becomes_epic() {
    let (_temp_dir, storage, config) = setup();
    let report = convert_project(storage.load_issues().unwrap(), &storage, &config).unwrap();
    let (headers, rows) = read_csv(&report.output_path);
    let feature = &rows[0];

    assert_eq!(column(&headers, feature, "idReadable"), vec!["DEMO-2"]);
    assert_eq!(column(&headers, feature, "Type"), vec!["Epic"]);
    assert_eq!(column(&headers, feature, "Epic Name"), vec!["Payments"]);
    assert_eq!(column(&headers, feature, "Component"), vec!["Checkout"]);
}

#[test]
fn test_story_fields() {
    let (_temp_dir, storage, config) = setup();
    let report = convert_project(storage.load_issues().unwrap(), &storage, &config).unwrap();
    let (headers, rows) = read_csv(&report.output_path);
    let story = &rows[1];

    assert_eq!(column(&headers, story, "Component"), vec!["Checkout"]);
    assert_eq!(column(&headers, story, "Epic Link"), vec!["Payments"]);
    assert_eq!(column(&headers, story, "Assignees"), vec!["dev@example.com"]);
    assert_eq!(column(&headers, story, "Swarmers"), vec!["qa@example.com"]);
    assert_eq!(column(&headers, story, "Sprints"), vec!["11"]);
    assert_eq!(column(&headers, story, "description"), vec!["h1. Scope\nCards only"]);
    assert_eq!(column(&headers, story, "resolved"), vec!["09/14/2020 12:26:40"]);
}

#[test]
fn test_comment_columns_merge_under_one_header() {
    let (_temp_dir, storage, config) = setup();
    let report = convert_project(storage.load_issues().unwrap(), &storage, &config).unwrap();
    let (headers, rows) = read_csv(&report.output_path);
    let story = &rows[1];

    let comments = column(&headers, story, "comments");
    assert_eq!(
        comments,
        vec![
            "09/13/2020 12:26:40; ; Gone User: \nh3. Done",
            "Task Deliverable Links:\nh2. Spec",
        ]
    );
}

#[test]
fn test_banned_user_asymmetry() {
    let (_temp_dir, storage, config) = setup();
    let report = convert_project(storage.load_issues().unwrap(), &storage, &config).unwrap();
    let (headers, rows) = read_csv(&report.output_path);
    let story = &rows[1];

    // Reporter is null (empty cell) while the comment author is an empty string.
    assert_eq!(column(&headers, story, "reporter"), vec![""]);
    assert!(column(&headers, story, "comments")[0].contains("; ; Gone User"));
}

#[test]
fn test_worklog_date_shifted_one_day() {
    let (_temp_dir, storage, config) = setup();
    let report = convert_project(storage.load_issues().unwrap(), &storage, &config).unwrap();
    let (headers, rows) = read_csv(&report.output_path);
    let story = &rows[1];

    assert_eq!(
        column(&headers, story, "worklogs"),
        vec!["Dev [No Worktype]: impl;09/14/2020 12:26:40;dev@example.com;2700"]
    );
}

#[test]
fn test_unsupported_field_aborts_project() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config {
        project_name: "BAD".to_string(),
        data_storage_path: temp_dir.path().to_path_buf(),
        ..Config::default()
    };
    let storage = Storage::from_config(&config).unwrap();
    let raw = RawIssueSet::from_value(json!([{
        "idReadable": "BAD-1",
        "customFields": [{"$type": "GanttIssueCustomField", "name": "Plan", "value": {}}]
    }]))
    .unwrap();

    let result = convert_project(raw, &storage, &config);
    assert!(matches!(
        result,
        Err(trackshift_core::Error::UnsupportedFieldType { .. })
    ));
    assert!(!storage.csv_path().exists());
}
