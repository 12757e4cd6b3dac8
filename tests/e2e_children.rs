mod common;
use common::cli::{tt, TtWorkspace};

use predicates::prelude::*;

const BRANCHY_SNAPSHOT: &str = concat!(
    "{\"key\": \"AAH-1\", \"status\": \"Backlog\", \"parent\": \"AAP-7\"}\n",
    "{\"key\": \"AAH-2\", \"status\": \"Backlog\", \"parent\": \"AAH-1\"}\n",
    "{\"key\": \"AAH-3\", \"status\": \"Backlog\", \"parent\": \"AAH-2\"}\n",
    "{\"key\": \"AAP-7\", \"status\": \"Backlog\"}\n",
    "{\"key\": \"OTHER-1\", \"status\": \"Backlog\"}\n",
);

#[test]
fn test_children_returns_root_and_strict_descendants() {
    let workspace = TtWorkspace::new(BRANCHY_SNAPSHOT);
    let output = tt(
        &workspace,
        &["--json", "children", "--key", "AAH-1", "--show-closed"],
    )
    .output()
    .expect("run tt");
    assert!(output.status.success(), "{output:?}");

    let tree: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    let keys: Vec<&String> = tree.as_object().unwrap().keys().collect();
    // The ancestor AAP-7 and unrelated OTHER-1 are gone.
    assert_eq!(keys, ["AAH-1", "AAH-2", "AAH-3"]);
}

#[test]
fn test_children_missing_root_is_an_error() {
    let workspace = TtWorkspace::new(BRANCHY_SNAPSHOT);
    tt(&workspace, &["children", "--key", "NOPE-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Root key not found"));
}

#[test]
fn test_lint_flags_backlog_parent_with_active_child() {
    let snapshot = concat!(
        "{\"key\": \"AAH-1\", \"status\": \"Backlog\"}\n",
        "{\"key\": \"AAH-2\", \"status\": \"In Progress\", \"parent\": \"AAH-1\"}\n",
    );
    let workspace = TtWorkspace::new(snapshot);
    tt(&workspace, &["lint", "--key", "AAH-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[RULE 1] AAH-1"));
}

#[test]
fn test_lint_project_scope_passes_clean_tree() {
    let snapshot = concat!(
        "{\"key\": \"AAH-1\", \"status\": \"In Progress\"}\n",
        "{\"key\": \"AAH-2\", \"status\": \"In Progress\", \"parent\": \"AAH-1\"}\n",
    );
    let workspace = TtWorkspace::new(snapshot);
    tt(&workspace, &["lint", "--project", "AAH"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no findings"));
}

#[test]
fn test_lint_without_scope_is_an_error() {
    let workspace = TtWorkspace::new("");
    tt(&workspace, &["lint"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--key or --project"));
}
