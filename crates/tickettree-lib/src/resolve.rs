//! Parent resolution across the competing reference fields.
//!
//! Trackers grow several ways to say "this issue belongs to that one": a
//! direct parent field, a feature link, an epic link. Exactly one wins, by
//! strict precedence. The precedence lives in one tested table because it
//! has changed over the project's history and regressions here silently
//! reshuffle every dashboard.

use crate::model::{FeatureLink, IssueRecord};

/// Extractor for one candidate parent field.
pub type ParentExtractor = fn(&IssueRecord) -> Option<&str>;

fn parent_field(record: &IssueRecord) -> Option<&str> {
    record.parent_ref.as_deref()
}

fn feature_field(record: &IssueRecord) -> Option<&str> {
    record.feature_ref.as_ref().and_then(FeatureLink::key)
}

fn epic_field(record: &IssueRecord) -> Option<&str> {
    record.epic_ref.as_deref()
}

/// Candidate parent fields in precedence order; the first non-empty value
/// wins regardless of what the remaining fields hold.
pub const PARENT_PRECEDENCE: [(&str, ParentExtractor); 3] = [
    ("parent", parent_field),
    ("feature", feature_field),
    ("epic", epic_field),
];

/// Resolve the single upstream reference for a record.
///
/// Malformed values (feature links without a key, blank strings) are
/// treated as absent, never as an error.
#[must_use]
pub fn resolve_parent(record: &IssueRecord) -> Option<String> {
    PARENT_PRECEDENCE.iter().find_map(|(_, extract)| {
        extract(record)
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(ToString::to_string)
    })
}
