// Rust guideline compliant 2026-10-18

//! Project download: issues, work items, agile boards and attachments.
//!
//! A download selects the project by short name, fetches the configured
//! issue window, merges work items into each issue's `worklogs`, keeps the
//! project's agile boards with readable sprint dates, optionally fetches
//! attachment files, and writes everything to the project's cache files.

use crate::client::YouTrackClient;
use crate::error::{FetchError, Result};
use rayon::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};
use trackshift_core::time::format_timestamp;
use trackshift_core::{Config, RawIssueSet, Storage, Timezone};

const PROJECT_FIELDS: &str = "id,name,shortName,description,leader(fullName),createdBy(fullName)";
const ATTACHMENT_FIELDS: &str = "name,mimeType,extension,url";
const AGILE_FIELDS: &str = "id,name,projects(shortName),sprints(name,goal,start,finish,id)";

/// One attachment file to download.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Attachment {
    /// File name.
    pub name: String,
    /// Server-relative download URL.
    pub url: String,
    /// Readable id of the owning issue.
    #[serde(skip)]
    pub issue_id: String,
}

/// Counts collected while downloading one project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    /// Project short name.
    pub project: String,
    /// Issues downloaded.
    pub issues: usize,
    /// Work items merged into issues.
    pub work_items: usize,
    /// Agile boards kept for the project.
    pub boards: usize,
    /// Attachment files saved.
    pub attachments_saved: usize,
    /// Attachment files that failed to download.
    pub attachments_failed: usize,
}

/// Selects the first project whose short name contains `name`.
///
/// # Errors
///
/// Returns `ProjectNotFound` listing the available short names.
pub fn select_project(projects: &[Value], name: &str) -> Result<Value> {
    projects
        .iter()
        .find(|project| short_name(project).contains(name))
        .cloned()
        .ok_or_else(|| FetchError::ProjectNotFound {
            project: name.to_string(),
            available: projects.iter().map(|p| short_name(p).to_string()).collect(),
        })
}

fn short_name(value: &Value) -> &str {
    value.get("shortName").and_then(Value::as_str).unwrap_or_default()
}

/// Appends each work item to the `worklogs` list of its issue.
///
/// Work items for issues outside the set are ignored.
///
/// # Returns
///
/// The number of work items merged.
pub fn merge_work_items(issues: &mut RawIssueSet, work_items: Vec<Value>) -> usize {
    let mut merged = 0;
    for item in work_items {
        let Some(issue_id) = item
            .get("issue")
            .and_then(|issue| issue.get("idReadable"))
            .and_then(Value::as_str)
            .map(str::to_string)
        else {
            continue;
        };
        let Some(Value::Object(issue)) = issues.get_mut(&issue_id) else {
            continue;
        };
        match issue.get_mut("worklogs") {
            Some(Value::Array(worklogs)) => worklogs.push(item),
            _ => {
                issue.insert("worklogs".to_string(), Value::Array(vec![item]));
            }
        }
        merged += 1;
    }
    merged
}

/// Keeps the agile boards that include the project and renders sprint dates.
///
/// Sprint `start` and `finish` timestamps become date strings; null stays null.
///
/// # Errors
///
/// Returns an error if a sprint date is out of range.
pub fn project_boards(boards: Vec<Value>, project: &str, timezone: Timezone) -> Result<Vec<Value>> {
    let mut kept = Vec::new();
    for mut board in boards {
        let includes_project = board
            .get("projects")
            .and_then(Value::as_array)
            .is_some_and(|projects| projects.iter().any(|p| short_name(p).contains(project)));
        if !includes_project {
            continue;
        }
        if let Some(Value::Array(sprints)) = board.get_mut("sprints") {
            for sprint in sprints.iter_mut().filter_map(Value::as_object_mut) {
                for key in ["start", "finish"] {
                    if let Some(millis) = sprint.get(key).and_then(Value::as_i64) {
                        let date = format_timestamp(millis, timezone)?;
                        sprint.insert(key.to_string(), Value::String(date));
                    }
                }
            }
        }
        kept.push(board);
    }
    Ok(kept)
}

/// Lists the attachments of every issue in the set.
///
/// # Errors
///
/// Returns an error if an attachment listing request fails.
pub fn list_attachments(client: &YouTrackClient, issues: &RawIssueSet) -> Result<Vec<Attachment>> {
    let mut attachments = Vec::new();
    for (issue_id, issue) in issues.iter() {
        let Some(internal_id) = issue.get("id").and_then(Value::as_str) else {
            warn!(issue = %issue_id, "issue has no internal id, skipping attachments");
            continue;
        };
        let listed: Vec<Attachment> = client.get_json(
            &format!("issues/{}/attachments", internal_id),
            &[
                ("fields", ATTACHMENT_FIELDS.to_string()),
                ("$top", "-1".to_string()),
            ],
        )?;
        attachments.extend(listed.into_iter().map(|attachment| Attachment {
            issue_id: issue_id.clone(),
            ..attachment
        }));
    }
    Ok(attachments)
}

/// Downloads attachment files concurrently.
///
/// Each file lands in `<project>/attachments/<issue id>/<name>`. A failing
/// file is logged and counted; it never aborts the batch.
///
/// # Returns
///
/// `(saved, failed)` counts.
pub fn download_attachments(
    client: &YouTrackClient,
    storage: &Storage,
    base_url: &str,
    attachments: &[Attachment],
) -> (usize, usize) {
    let saved = attachments
        .par_iter()
        .filter(|attachment| match save_attachment(client, storage, base_url, attachment) {
            Ok(()) => {
                info!(issue = %attachment.issue_id, name = %attachment.name, "saved attachment");
                true
            }
            Err(e) => {
                warn!(
                    issue = %attachment.issue_id,
                    name = %attachment.name,
                    error = %e,
                    "failed to download attachment"
                );
                false
            }
        })
        .count();
    (saved, attachments.len() - saved)
}

fn save_attachment(
    client: &YouTrackClient,
    storage: &Storage,
    base_url: &str,
    attachment: &Attachment,
) -> Result<()> {
    let file_name = Path::new(&attachment.name).file_name().ok_or_else(|| {
        FetchError::Http(format!("attachment name '{}' is not a file name", attachment.name))
    })?;
    let bytes = client.download(&format!("{}{}", base_url.trim_end_matches('/'), attachment.url))?;
    let dir = storage.attachment_dir(&attachment.issue_id);
    std::fs::create_dir_all(&dir)?;
    std::fs::write(dir.join(file_name), bytes)?;
    Ok(())
}

/// Downloads one project and writes its cache files.
///
/// # Arguments
///
/// * `client` - Authenticated API client
/// * `config` - Settings for the project to download
/// * `storage` - The project's file layout
///
/// # Returns
///
/// The downloaded raw issues and a download report.
///
/// # Errors
///
/// Returns an error if:
/// - The project does not exist on the server
/// - An issue, work item or board request fails
/// - A downloaded issue has no readable id
/// - A cache file cannot be written
pub fn download_project(
    client: &YouTrackClient,
    config: &Config,
    storage: &Storage,
) -> Result<(RawIssueSet, DownloadReport)> {
    let project_name = config.project_name.as_str();

    info!(project = %project_name, "getting project id");
    let projects: Vec<Value> =
        client.get_json("admin/projects", &[("fields", PROJECT_FIELDS.to_string())])?;
    let project = select_project(&projects, project_name)?;
    let project_id = project
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| FetchError::Http("project has no id".to_string()))?;

    info!(
        count = config.num_issues_to_retrieve,
        start = config.start_issue,
        "requesting issues"
    );
    let listed: Vec<Value> = client.get_json(
        &format!("admin/projects/{}/issues", project_id),
        &[
            ("fields", config.issue_field_selector()),
            ("$skip", config.start_issue.saturating_sub(1).to_string()),
            ("$top", config.num_issues_to_retrieve.to_string()),
        ],
    )?;
    let mut issues = RawIssueSet::new();
    for issue in listed {
        issues.insert(issue)?;
    }

    let mut report = DownloadReport {
        project: project_name.to_string(),
        issues: issues.len(),
        ..DownloadReport::default()
    };

    if config.save_attachments {
        info!("gathering issue attachments");
        let attachments = list_attachments(client, &issues)?;
        info!(count = attachments.len(), "downloading issue attachments");
        let (saved, failed) =
            download_attachments(client, storage, &config.attachment_base_url, &attachments);
        report.attachments_saved = saved;
        report.attachments_failed = failed;
    }

    info!("requesting work items");
    let work_items: Vec<Value> = client.get_json(
        "workItems",
        &[
            ("fields", config.work_item_field_selector()),
            ("query", format!("project: {{{}}}", project_name)),
            ("$top", "-1".to_string()),
        ],
    )?;
    report.work_items = merge_work_items(&mut issues, work_items);

    info!("requesting agile boards");
    let boards: Vec<Value> = client.get_json("agiles", &[("fields", AGILE_FIELDS.to_string())])?;
    let boards = project_boards(boards, project_name, config.timezone)?;
    report.boards = boards.len();

    storage.save_issues(&issues)?;
    storage.save_sprints(&boards)?;
    storage.save_project(&project)?;

    Ok((issues, report))
}
