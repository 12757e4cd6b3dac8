//! Status-consistency linting over built trees.
//!
//! Each rule inspects one key against its subtree. Rules live in a single
//! numbered table so reports stay stable as rules are added.

use serde::Serialize;
use tracing::debug;

use tickettree_lib::util::compare_keys;
use tickettree_lib::{build_tree, IssueRecord, Status, TicketTree, TreeOptions};

/// One rule violation.
#[derive(Debug, Clone, Serialize)]
pub struct LintFinding {
    pub rule: u32,
    pub key: String,
    pub message: String,
}

type RuleFn = fn(&TicketTree, &str) -> Option<LintFinding>;

/// Numbered rule table.
pub const RULES: [(u32, RuleFn); 1] = [(1, rule_parent_child_status)];

/// Rule 1: a parent's status must be coherent with its children's.
///
/// Refinement and Backlog parents must not have in-progress children; an
/// In Progress parent must have at least one.
fn rule_parent_child_status(tree: &TicketTree, key: &str) -> Option<LintFinding> {
    let node = tree.get(key)?;

    let child_states: Vec<&Status> = tree
        .values()
        .filter(|child| child.parent_key.as_deref() == Some(key))
        .filter_map(|child| child.status.as_ref())
        .collect();
    if child_states.is_empty() {
        return None;
    }

    let any_in_progress = child_states.iter().any(|s| **s == Status::InProgress);
    let message = match node.status {
        Some(Status::Refinement) if any_in_progress => {
            "is \"Refinement\" but has children in progress"
        }
        Some(Status::Backlog) if any_in_progress => {
            "is \"Backlog\" but has children in progress"
        }
        Some(Status::InProgress) if !any_in_progress => {
            "is \"In Progress\" but none of its children are"
        }
        _ => return None,
    };

    Some(LintFinding {
        rule: 1,
        key: key.to_string(),
        message: message.to_string(),
    })
}

/// Lint one key against its own subtree.
///
/// The tree is built fresh per key, scoped to the key with closed issues
/// retained, the same view the original reports were linted against.
#[must_use]
pub fn lint_key(records: &[IssueRecord], key: &str) -> Vec<LintFinding> {
    debug!(key = %key, "lint key");
    let options = TreeOptions {
        filter_key: Some(key.to_string()),
        filter_project: None,
        show_closed: true,
        map_progress: true,
    };
    let tree = build_tree(records, &options);
    RULES
        .iter()
        .filter_map(|(_, rule)| rule(&tree, key))
        .collect()
}

/// Keys worth linting in a project: every non-Closed record, in
/// (project, number) order.
#[must_use]
pub fn collect_keys(records: &[IssueRecord], project: &str) -> Vec<String> {
    let mut keys: Vec<String> = records
        .iter()
        .filter(|record| record.project == project)
        .filter(|record| record.status != Some(Status::Closed))
        .map(|record| record.key.clone())
        .collect();
    keys.sort_by(|a, b| compare_keys(a, b));
    keys.dedup();
    keys
}
