// Rust guideline compliant 2026-10-18

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use serde_json::json;
use tempfile::TempDir;
use trackshift_core::rules::apply_rules_to_set;
use trackshift_core::{
    builtin_registry, convert_issues, flatten, normalize_all, Config, RawIssueSet, RuleSettings, Storage,
    Timezone,
};

/// Builds a chain of Epic → Feature → User Story → Task groups.
fn build_raw_issues(count: usize) -> RawIssueSet {
    let kinds = ["Epic", "Feature", "User Story", "Task"];
    let mut issues = RawIssueSet::new();
    for i in 0..count {
        let kind = kinds[i % kinds.len()];
        let mut links = Vec::new();
        if i % kinds.len() != 0 {
            links.push(json!({
                "direction": "INWARD",
                "linkType": {"sourceToTarget": "parent for", "targetToSource": "subtask of"},
                "issues": [{"idReadable": format!("B-{}", i - 1)}]
            }));
        }
        if i > 0 {
            links.push(json!({
                "direction": "BOTH",
                "linkType": {"sourceToTarget": "relates to", "targetToSource": "relates to"},
                "issues": [{"idReadable": format!("B-{}", i - 1)}]
            }));
        }
        issues
            .insert(json!({
                "idReadable": format!("B-{}", i),
                "summary": format!("Issue {}", i),
                "description": "# Heading\nbody\n## Sub",
                "created": 1_600_000_000_000i64 + i as i64,
                "updated": 1_600_000_000_000i64 + i as i64,
                "resolved": null,
                "reporter": {"email": "bench@example.com", "banned": false},
                "customFields": [
                    {"$type": "SingleEnumIssueCustomField", "name": "Type", "value": {"name": kind}},
                    {
                        "$type": "MultiUserIssueCustomField",
                        "name": "Assignees",
                        "value": [
                            {"email": "a@example.com", "banned": false},
                            {"email": "b@example.com", "banned": false}
                        ]
                    },
                    {
                        "$type": "MultiEnumIssueCustomField",
                        "name": "Sprints",
                        "value": [{"name": format!("Sprint {}", i % 20)}]
                    }
                ],
                "links": links,
                "comments": [{
                    "created": 1_600_000_000_000i64,
                    "text": "### Note",
                    "author": {"email": "c@example.com", "fullName": "C", "banned": false}
                }]
            }))
            .expect("Failed to insert benchmark issue");
    }
    issues
}

fn utc_config() -> Config {
    Config {
        timezone: Timezone::Utc,
        ..Config::default()
    }
}

fn bench_normalize(c: &mut Criterion) {
    let raw = build_raw_issues(1000);
    c.bench_function("normalize_1000", |b| {
        b.iter_batched(
            || raw.clone(),
            |raw| black_box(normalize_all(raw, Timezone::Utc)),
            BatchSize::SmallInput,
        )
    });
}

fn bench_rules(c: &mut Criterion) {
    let issues = normalize_all(build_raw_issues(1000), Timezone::Utc).expect("Failed to normalize");
    let registry = builtin_registry(&RuleSettings::default()).expect("Failed to build registry");
    c.bench_function("rules_1000", |b| {
        b.iter(|| black_box(apply_rules_to_set(&issues, &registry)))
    });
}

fn bench_flatten(c: &mut Criterion) {
    let issues = normalize_all(build_raw_issues(1000), Timezone::Utc).expect("Failed to normalize");
    let registry = builtin_registry(&RuleSettings::default()).expect("Failed to build registry");
    let processed = apply_rules_to_set(&issues, &registry).expect("Failed to apply rules");
    c.bench_function("flatten_1000", |b| b.iter(|| black_box(flatten(&processed))));
}

fn bench_convert(c: &mut Criterion) {
    let raw = build_raw_issues(1000);
    let config = utc_config();
    c.bench_function("convert_1000", |b| {
        b.iter_batched(
            || raw.clone(),
            |raw| black_box(convert_issues(raw, &config)),
            BatchSize::SmallInput,
        )
    });
}

fn bench_load_cache(c: &mut Criterion) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let storage = Storage::new(temp_dir.path(), "B").expect("Failed to create storage");
    storage
        .save_issues(&build_raw_issues(1000))
        .expect("Failed to save benchmark issues");
    c.bench_function("load_cache_1000", |b| b.iter(|| black_box(storage.load_issues())));
}

criterion_group!(
    benches,
    bench_normalize,
    bench_rules,
    bench_flatten,
    bench_convert,
    bench_load_cache
);
criterion_main!(benches);
