//! The relationship graph and progress-rollup engine.
//!
//! Everything here is fixed-point iteration over a sparse parent-pointer
//! map: selection closes over ancestors and descendants, progress closes
//! over transitive descendants. Growth is driven by set membership rather
//! than recursion, so cyclic parent chains stabilize instead of
//! overflowing; a pass cap of `node_count + 1` turns any input the loops
//! cannot settle into a logged graph anomaly with a best-effort result.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::error::{Result, TreeError};
use crate::model::{IssueRecord, Node, Status, TicketTree};
use crate::query::TreeOptions;
use crate::resolve::resolve_parent;

fn pass_cap(map: &TicketTree) -> usize {
    map.len() + 1
}

/// Merge a record catalog into a `key -> Node` map.
///
/// Every resolved parent key is guaranteed a map entry: real when the
/// catalog has the record, a placeholder otherwise. An entry first created
/// as a placeholder is filled in once its own record is processed, and a
/// null summary is backfilled without disturbing the rest of the node.
#[must_use]
pub fn assemble(records: &[IssueRecord]) -> TicketTree {
    debug!("assemble {} records into nodes", records.len());

    let mut map = TicketTree::new();
    for record in records {
        let parent_key = resolve_parent(record);

        let node = map
            .entry(record.key.clone())
            .or_insert_with(|| Node::placeholder(record.key.as_str()));
        if node.is_placeholder() {
            node.issue_type = record.issue_type.clone();
            node.status = record.status.clone();
            node.parent_key = parent_key.clone();
        }
        if node.summary.is_none() {
            node.summary = record.summary.clone();
        }

        if let Some(parent_key) = parent_key {
            if !map.contains_key(&parent_key) {
                map.insert(parent_key.clone(), Node::placeholder(parent_key));
            }
        }
    }
    map
}

/// Induced subgraph for a key and/or project prefix.
///
/// Seeds with direct matches, then closes upward over parent chains and
/// downward over children until neither pass adds a node.
fn select(full: &TicketTree, filter_key: Option<&str>, filter_project: Option<&str>) -> TicketTree {
    if filter_key.is_none() && filter_project.is_none() {
        return full.clone();
    }

    let mut selected = TicketTree::new();

    if let Some(filter_key) = filter_key {
        for (key, node) in full {
            if key == filter_key || node.parent_key.as_deref() == Some(filter_key) {
                selected.insert(key.clone(), node.clone());
            }
        }
    }

    if let Some(filter_project) = filter_project {
        let prefix = format!("{filter_project}-");
        for (key, node) in full {
            if key.starts_with(&prefix) {
                selected.insert(key.clone(), node.clone());
            }
        }
    }

    let cap = pass_cap(full);

    // Ancestor closure. Parents the catalog never saw come in as
    // placeholders so the closure invariant holds for the result too.
    let mut passes = 0;
    loop {
        let missing: Vec<String> = selected
            .values()
            .filter_map(|node| node.parent_key.clone())
            .filter(|parent| !selected.contains_key(parent))
            .collect();
        if missing.is_empty() {
            break;
        }
        passes += 1;
        if passes > cap {
            warn!(passes = passes, "ancestor closure exceeded pass cap; graph anomaly");
            break;
        }
        for parent in missing {
            let node = full
                .get(&parent)
                .cloned()
                .unwrap_or_else(|| Node::placeholder(parent.as_str()));
            selected.insert(parent, node);
        }
    }

    // Descendant closure.
    let mut passes = 0;
    loop {
        let added: Vec<(String, Node)> = full
            .iter()
            .filter(|(key, _)| !selected.contains_key(*key))
            .filter(|(_, node)| {
                node.parent_key
                    .as_deref()
                    .is_some_and(|parent| selected.contains_key(parent))
            })
            .map(|(key, node)| (key.clone(), node.clone()))
            .collect();
        if added.is_empty() {
            break;
        }
        passes += 1;
        if passes > cap {
            warn!(passes = passes, "descendant closure exceeded pass cap; graph anomaly");
            break;
        }
        for (key, node) in added {
            selected.insert(key, node);
        }
    }

    selected
}

/// Full transitive descendant set of `key` within `map`.
///
/// Iterative set-growth: a node joins once its parent is `key` or already
/// in the set. A cycle through `key` puts `key` itself in the set exactly
/// once and the growth still settles.
#[must_use]
pub fn descendants(map: &TicketTree, key: &str) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    let cap = pass_cap(map);
    let mut passes = 0;
    loop {
        let mut changed = false;
        for (candidate, node) in map {
            let Some(parent) = node.parent_key.as_deref() else {
                continue;
            };
            if found.contains(candidate) {
                continue;
            }
            if parent == key || found.contains(parent) {
                found.insert(candidate.clone());
                changed = true;
            }
        }
        if !changed {
            break;
        }
        passes += 1;
        if passes > cap {
            warn!(
                key = %key,
                passes = passes,
                "descendant closure exceeded pass cap; graph anomaly"
            );
            break;
        }
    }
    found
}

/// Derive the percent-complete rollup for every node in `tree`.
///
/// Descendant sets come from the unfiltered `full` map: progress reflects
/// an issue's true subtree even when the caller only retained a slice of
/// it. Each descendant counts as one unit, open or closed; a descendant's
/// own rollup never weights its contribution.
#[allow(clippy::cast_possible_truncation)]
fn map_progress(tree: &mut TicketTree, full: &TicketTree) {
    debug!("map progress for {} nodes", tree.len());

    for (key, node) in tree.iter_mut() {
        let found = descendants(full, key);
        if found.is_empty() {
            let done = node.status.as_ref().is_some_and(Status::is_terminal);
            node.completed = Some(if done { "100%" } else { "0%" }.to_string());
            continue;
        }

        let total = found.len();
        let closed = found
            .iter()
            .filter(|k| full.get(k.as_str()).is_some_and(Node::is_closed))
            .count();
        let percent = (100.0 * closed as f64 / total as f64).round() as i64;
        node.completed = Some(format!("{percent}%"));
    }
}

/// Drop nodes in the terminal "Closed" state.
fn prune_closed(tree: &mut TicketTree) {
    tree.retain(|_, node| !node.is_closed());
}

/// Build the relationship tree for a snapshot.
///
/// Stages: assemble the full catalog, select the induced subgraph for any
/// filters, roll up progress (against the unfiltered map), prune closed
/// nodes last so a closed parent still contributed to every rollup.
///
/// Rebuilding from the same snapshot and options yields an identical map;
/// nothing is cached between calls.
#[must_use]
pub fn build_tree(records: &[IssueRecord], options: &TreeOptions) -> TicketTree {
    debug!("build tree over {} records", records.len());

    let full = assemble(records);
    let mut tree = select(
        &full,
        options.filter_key.as_deref(),
        options.filter_project.as_deref(),
    );
    debug!("selected {} of {} nodes", tree.len(), full.len());

    if options.map_progress {
        map_progress(&mut tree, &full);
    }
    if !options.show_closed {
        prune_closed(&mut tree);
    }
    tree
}

/// Reduce a tree to a root's strict descendants plus the root itself.
///
/// With no `tree` supplied, one is built from the records with the same
/// options first. Key mode walks the child closure; project mode is a
/// plain prefix cut with no walk.
///
/// # Errors
///
/// Returns [`TreeError::RootNotFound`] when `filter_key` is set but absent
/// from the extracted result; asking for the subtree of a key the source
/// map does not contain is an invalid call, not an empty one.
pub fn build_child_subtree(
    records: &[IssueRecord],
    options: &TreeOptions,
    tree: Option<TicketTree>,
) -> Result<TicketTree> {
    let mut tree = tree.unwrap_or_else(|| build_tree(records, options));

    if let Some(filter_key) = options.filter_key.as_deref() {
        debug!(key = %filter_key, "reduce to child subtree");
        let mut keep = descendants(&tree, filter_key);
        keep.insert(filter_key.to_string());
        tree.retain(|key, _| keep.contains(key));
    }

    if let Some(filter_project) = options.filter_project.as_deref() {
        debug!(project = %filter_project, "reduce to project");
        let prefix = format!("{filter_project}-");
        tree.retain(|key, _| key.starts_with(&prefix));
    }

    if let Some(filter_key) = options.filter_key.as_deref() {
        if !tree.contains_key(filter_key) {
            return Err(TreeError::RootNotFound {
                key: filter_key.to_string(),
            });
        }
    }

    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FeatureLink;
    use proptest::prelude::*;

    fn issue(key: &str, status: Status) -> IssueRecord {
        let mut record = IssueRecord::new(key);
        record.status = Some(status);
        record.summary = Some(format!("Summary for {key}"));
        record
    }

    fn child(key: &str, status: Status, parent: &str) -> IssueRecord {
        let mut record = issue(key, status);
        record.parent_ref = Some(parent.to_string());
        record
    }

    #[test]
    fn test_assemble_links_resolved_parents() {
        let records = vec![
            issue("AAH-1", Status::Backlog),
            child("AAH-2", Status::InProgress, "AAH-1"),
        ];
        let map = assemble(&records);
        assert_eq!(map.len(), 2);
        assert_eq!(map["AAH-2"].parent_key.as_deref(), Some("AAH-1"));
        assert_eq!(map["AAH-1"].parent_key, None);
    }

    #[test]
    fn test_assemble_synthesizes_placeholder_for_unknown_parent() {
        let records = vec![child("AAH-1", Status::Backlog, "Z-1")];
        let map = assemble(&records);

        let placeholder = &map["Z-1"];
        assert!(placeholder.is_placeholder());
        assert_eq!(placeholder.key, "Z-1");
        assert_eq!(placeholder.status, None);
        assert_eq!(placeholder.summary, None);
    }

    #[test]
    fn test_assemble_fills_placeholder_when_record_arrives_later() {
        // AAH-2 references AAH-9 before AAH-9's own record is processed.
        let records = vec![
            child("AAH-2", Status::Backlog, "AAH-9"),
            child("AAH-9", Status::InProgress, "AAH-1"),
        ];
        let map = assemble(&records);

        let node = &map["AAH-9"];
        assert_eq!(node.status, Some(Status::InProgress));
        assert_eq!(node.parent_key.as_deref(), Some("AAH-1"));
        assert_eq!(node.summary.as_deref(), Some("Summary for AAH-9"));
    }

    #[test]
    fn test_assemble_closure_invariant() {
        let mut with_feature = issue("AAP-3", Status::Backlog);
        with_feature.feature_ref = Some(FeatureLink::new("ANSTRAT-37"));
        let records = vec![
            child("AAH-1", Status::Backlog, "MISSING-1"),
            child("AAH-2", Status::Backlog, "AAH-1"),
            with_feature,
        ];
        let map = assemble(&records);
        for node in map.values() {
            if let Some(parent) = node.parent_key.as_deref() {
                assert!(map.contains_key(parent), "dangling parent {parent}");
            }
        }
    }

    #[test]
    fn test_descendants_transitive() {
        let records = vec![
            issue("AAH-1", Status::Backlog),
            child("AAH-2", Status::Backlog, "AAH-1"),
            child("AAH-3", Status::Backlog, "AAH-2"),
            issue("AAH-4", Status::Backlog),
        ];
        let map = assemble(&records);
        let found = descendants(&map, "AAH-1");
        assert_eq!(
            found.into_iter().collect::<Vec<_>>(),
            vec!["AAH-2", "AAH-3"]
        );
    }

    #[test]
    fn test_descendants_tolerates_cycle() {
        // AAH-1 and AAH-2 point at each other; AAH-3 hangs off AAH-1.
        let records = vec![
            child("AAH-1", Status::Backlog, "AAH-2"),
            child("AAH-2", Status::Backlog, "AAH-1"),
            child("AAH-3", Status::Backlog, "AAH-1"),
        ];
        let map = assemble(&records);

        let found = descendants(&map, "AAH-1");
        assert!(found.contains("AAH-2"));
        assert!(found.contains("AAH-3"));
        // The cycle loops back through the root; it joins its own
        // descendant set exactly once rather than looping forever.
        assert!(found.contains("AAH-1"));
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn test_progress_leaf_terminal_states() {
        let records = vec![
            issue("AAH-1", Status::Closed),
            issue("AAH-2", Status::ReleasePending),
            issue("AAH-3", Status::Backlog),
        ];
        let options = TreeOptions {
            map_progress: true,
            ..TreeOptions::default()
        };
        let tree = build_tree(&records, &options);
        assert_eq!(tree["AAH-1"].completed.as_deref(), Some("100%"));
        assert_eq!(tree["AAH-2"].completed.as_deref(), Some("100%"));
        assert_eq!(tree["AAH-3"].completed.as_deref(), Some("0%"));
    }

    #[test]
    fn test_progress_rollup_scenario() {
        let records = vec![
            issue("AAH-1", Status::Backlog),
            child("AAH-2", Status::Closed, "AAH-1"),
            child("AAH-3", Status::InProgress, "AAH-1"),
            child("AAH-4", Status::Closed, "AAH-2"),
        ];
        let options = TreeOptions {
            map_progress: true,
            ..TreeOptions::default()
        };
        let tree = build_tree(&records, &options);

        assert_eq!(tree["AAH-4"].completed.as_deref(), Some("100%"));
        assert_eq!(tree["AAH-3"].completed.as_deref(), Some("0%"));
        assert_eq!(tree["AAH-2"].completed.as_deref(), Some("100%"));
        // 2 of {AAH-2, AAH-3, AAH-4} closed -> round(66.67) = 67.
        assert_eq!(tree["AAH-1"].completed.as_deref(), Some("67%"));
    }

    #[test]
    fn test_progress_monotonic_in_closed_count() {
        let mut last = 0;
        for closed_count in 0..=6 {
            let mut records = vec![issue("AAH-1", Status::Backlog)];
            for n in 0..6 {
                let status = if n < closed_count {
                    Status::Closed
                } else {
                    Status::Backlog
                };
                records.push(child(&format!("AAH-{}", n + 2), status, "AAH-1"));
            }
            let options = TreeOptions {
                map_progress: true,
                ..TreeOptions::default()
            };
            let tree = build_tree(&records, &options);
            let completed = tree["AAH-1"].completed.clone().unwrap();
            let percent: i64 = completed.trim_end_matches('%').parse().unwrap();
            assert!(percent >= last, "{closed_count} closed: {percent} < {last}");
            last = percent;
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn test_progress_disabled_leaves_completed_unset() {
        let records = vec![
            issue("AAH-1", Status::Closed),
            child("AAH-2", Status::Backlog, "AAH-1"),
        ];
        let tree = build_tree(&records, &TreeOptions::default());
        assert!(tree.values().all(|node| node.completed.is_none()));
    }

    #[test]
    fn test_progress_ignores_subgraph_filtering() {
        // AAH-2 is selected; its closed child AAH-3 lives outside the
        // project filter but still drives the rollup.
        let records = vec![
            issue("AAH-1", Status::Backlog),
            child("AAH-2", Status::InProgress, "AAH-1"),
            child("OTHER-3", Status::Closed, "AAH-2"),
        ];
        let options = TreeOptions {
            filter_key: Some("AAH-2".to_string()),
            map_progress: true,
            ..TreeOptions::default()
        };
        let tree = build_tree(&records, &options);
        assert_eq!(tree["AAH-2"].completed.as_deref(), Some("100%"));
    }

    #[test]
    fn test_project_selection_is_prefix_ancestors_descendants() {
        let records = vec![
            child("P-1", Status::Backlog, "X-1"),
            child("P-2", Status::Backlog, "P-1"),
            // Z-9 is outside the prefix but descends from a selected node.
            child("Z-9", Status::Backlog, "P-2"),
            issue("Y-1", Status::Backlog),
            // PX-1 must not leak in via the bare prefix.
            issue("PX-1", Status::Backlog),
        ];
        let tree = build_tree(&records, &TreeOptions::for_project("P"));

        let keys: Vec<&str> = tree.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["P-1", "P-2", "X-1", "Z-9"]);
    }

    #[test]
    fn test_key_selection_pulls_ancestor_chain() {
        let records = vec![
            issue("AAH-1", Status::Backlog),
            child("AAH-2", Status::Backlog, "AAH-1"),
            child("AAH-3", Status::Backlog, "AAH-2"),
            issue("AAH-4", Status::Backlog),
        ];
        let tree = build_tree(&records, &TreeOptions::for_key("AAH-3"));

        let keys: Vec<&str> = tree.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["AAH-1", "AAH-2", "AAH-3"]);
    }

    #[test]
    fn test_selection_invents_placeholder_ancestor() {
        let records = vec![child("AAH-1", Status::Backlog, "GONE-7")];
        let tree = build_tree(&records, &TreeOptions::for_key("AAH-1"));
        assert!(tree["GONE-7"].is_placeholder());
    }

    #[test]
    fn test_prune_closed_runs_after_progress() {
        let records = vec![
            issue("AAH-1", Status::Backlog),
            child("AAH-2", Status::Closed, "AAH-1"),
            child("AAH-3", Status::Backlog, "AAH-1"),
        ];
        let options = TreeOptions {
            show_closed: false,
            map_progress: true,
            ..TreeOptions::default()
        };
        let tree = build_tree(&records, &options);

        assert!(!tree.contains_key("AAH-2"));
        // The pruned closed child still counted: 1 of 2 -> 50%.
        assert_eq!(tree["AAH-1"].completed.as_deref(), Some("50%"));
    }

    #[test]
    fn test_build_tree_idempotent() {
        let records = vec![
            issue("AAH-1", Status::Backlog),
            child("AAH-2", Status::Closed, "AAH-1"),
            child("AAP-3", Status::InProgress, "AAH-2"),
        ];
        let options = TreeOptions {
            map_progress: true,
            ..TreeOptions::default()
        };
        assert_eq!(build_tree(&records, &options), build_tree(&records, &options));
    }

    #[test]
    fn test_child_subtree_is_strict_descendants_plus_root() {
        let records = vec![
            issue("AAH-1", Status::Backlog),
            child("AAH-2", Status::Backlog, "AAH-1"),
            child("AAH-3", Status::Backlog, "AAH-2"),
            // Unrelated branch.
            issue("AAP-1", Status::Backlog),
            child("AAP-2", Status::Backlog, "AAP-1"),
        ];
        let tree = build_child_subtree(&records, &TreeOptions::for_key("AAH-1"), None).unwrap();

        let keys: Vec<&str> = tree.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["AAH-1", "AAH-2", "AAH-3"]);
    }

    #[test]
    fn test_child_subtree_missing_root_is_fatal() {
        let records = vec![issue("AAH-1", Status::Backlog)];
        let err =
            build_child_subtree(&records, &TreeOptions::for_key("NOPE-1"), None).unwrap_err();
        assert!(matches!(err, TreeError::RootNotFound { .. }));
    }

    #[test]
    fn test_child_subtree_project_mode_is_plain_prefix_cut() {
        let records = vec![
            issue("AAH-1", Status::Backlog),
            child("AAP-2", Status::Backlog, "AAH-1"),
        ];
        let options = TreeOptions::for_project("AAP");
        let tree = build_child_subtree(&records, &options, None).unwrap();

        let keys: Vec<&str> = tree.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["AAP-2"]);
    }

    #[test]
    fn test_child_subtree_accepts_prebuilt_tree() {
        let records = vec![
            issue("AAH-1", Status::Backlog),
            child("AAH-2", Status::Backlog, "AAH-1"),
        ];
        let prebuilt = build_tree(&records, &TreeOptions::default());
        let tree =
            build_child_subtree(&[], &TreeOptions::for_key("AAH-1"), Some(prebuilt)).unwrap();
        assert_eq!(tree.len(), 2);
    }

    proptest! {
        // Closure invariant: whatever the reference tangle, every
        // parent_key in the assembled map is itself a key in the map.
        #[test]
        fn prop_assembled_map_has_no_dangling_parents(
            edges in proptest::collection::vec((0u8..24, proptest::option::of(0u8..32)), 0..40)
        ) {
            let records: Vec<IssueRecord> = edges
                .iter()
                .map(|(n, parent)| {
                    let mut record = IssueRecord::new(format!("AAH-{n}"));
                    record.parent_ref = parent.map(|p| format!("AAH-{p}"));
                    record
                })
                .collect();
            let map = assemble(&records);
            for node in map.values() {
                if let Some(parent) = node.parent_key.as_deref() {
                    prop_assert!(map.contains_key(parent));
                }
            }
        }

        // Selection never invents progress or drops the seed's ancestors.
        #[test]
        fn prop_key_selection_contains_seed_when_present(
            edges in proptest::collection::vec((0u8..16, proptest::option::of(0u8..16)), 1..24)
        ) {
            let records: Vec<IssueRecord> = edges
                .iter()
                .map(|(n, parent)| {
                    let mut record = IssueRecord::new(format!("AAH-{n}"));
                    record.parent_ref = parent.map(|p| format!("AAH-{p}"));
                    record
                })
                .collect();
            let seed = records[0].key.clone();
            let tree = build_tree(&records, &TreeOptions::for_key(seed.clone()));
            prop_assert!(tree.contains_key(&seed));
            for node in tree.values() {
                if let Some(parent) = node.parent_key.as_deref() {
                    prop_assert!(tree.contains_key(parent));
                }
            }
        }
    }
}
