//! Text rendering for trees.
//!
//! Plain (non-ANSI) terminal output: one line per node, two-space
//! indentation per depth, status icons up front.

use std::collections::BTreeSet;

use tickettree_lib::util::compare_keys;
use tickettree_lib::{Node, Status, TicketTree};

/// Status icon characters.
pub mod icons {
    /// Not started (hollow circle).
    pub const TODO: &str = "○";
    /// Being shaped (half-filled).
    pub const REFINEMENT: &str = "◐";
    /// Active work (filled circle).
    pub const IN_PROGRESS: &str = "●";
    /// Terminal (checkmark).
    pub const DONE: &str = "✓";
    /// Placeholder or unknown state.
    pub const UNKNOWN: &str = "?";
}

/// Return the icon character for a status.
#[must_use]
pub const fn status_icon(status: Option<&Status>) -> &'static str {
    match status {
        Some(Status::New | Status::Backlog) => icons::TODO,
        Some(Status::Refinement) => icons::REFINEMENT,
        Some(Status::InProgress) => icons::IN_PROGRESS,
        Some(Status::Closed | Status::ReleasePending) => icons::DONE,
        Some(Status::Custom(_)) | None => icons::UNKNOWN,
    }
}

/// Format a single-line node summary.
///
/// Format: `{icon} {key} [{type}] {summary} ({completed})`, with absent
/// pieces dropped.
#[must_use]
pub fn format_node_line(node: &Node) -> String {
    let mut line = format!("{} {}", status_icon(node.status.as_ref()), node.key);
    if let Some(issue_type) = &node.issue_type {
        line.push_str(&format!(" [{issue_type}]"));
    }
    if let Some(summary) = &node.summary {
        line.push(' ');
        line.push_str(summary);
    }
    if let Some(completed) = &node.completed {
        line.push_str(&format!(" ({completed})"));
    }
    line
}

/// Render a tree as indented text.
///
/// Roots are nodes whose parent is absent from the map (pruning and
/// subtree cuts orphan nodes routinely). Siblings come out in
/// (project, number) order. The visited guard keeps cyclic parent chains
/// from looping; members of a cycle unreachable from any root are emitted
/// at top level.
#[must_use]
pub fn render_tree(tree: &TicketTree) -> String {
    let mut roots: Vec<&str> = tree
        .values()
        .filter(|node| {
            node.parent_key
                .as_deref()
                .is_none_or(|parent| !tree.contains_key(parent))
        })
        .map(|node| node.key.as_str())
        .collect();
    roots.sort_by(|a, b| compare_keys(a, b));

    let mut out = String::new();
    let mut visited: BTreeSet<&str> = BTreeSet::new();
    let mut stack: Vec<(&str, usize)> = Vec::new();

    let seeds = roots.into_iter().chain(tree.keys().map(String::as_str));
    for seed in seeds {
        stack.push((seed, 0));
        while let Some((key, depth)) = stack.pop() {
            if !visited.insert(key) {
                continue;
            }
            let node = &tree[key];
            out.push_str(&"  ".repeat(depth));
            out.push_str(&format_node_line(node));
            out.push('\n');

            let mut children: Vec<&str> = tree
                .values()
                .filter(|child| child.parent_key.as_deref() == Some(key))
                .map(|child| child.key.as_str())
                .collect();
            children.sort_by(|a, b| compare_keys(a, b));
            for child in children.into_iter().rev() {
                stack.push((child, depth + 1));
            }
        }
    }

    out
}
