//! Core data types for tickettree-lib.
//!
//! Records deserialize with the tracker's wire spellings ("In Progress",
//! "Release Pending") so snapshot files round-trip unchanged.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util;

/// Workflow state of an issue.
///
/// Unknown states are carried through verbatim via `Custom` rather than
/// rejected; snapshots routinely contain per-project states.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    New,
    Backlog,
    Refinement,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Release Pending")]
    ReleasePending,
    Closed,
    #[serde(untagged)]
    Custom(String),
}

impl Status {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::New => "New",
            Self::Backlog => "Backlog",
            Self::Refinement => "Refinement",
            Self::InProgress => "In Progress",
            Self::ReleasePending => "Release Pending",
            Self::Closed => "Closed",
            Self::Custom(value) => value,
        }
    }

    /// True for states that count as "done" when a leaf reports progress.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::ReleasePending)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Issue type category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueType {
    Outcome,
    Epic,
    Feature,
    Story,
    Task,
    Bug,
    #[serde(untagged)]
    Custom(String),
}

impl IssueType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Outcome => "Outcome",
            Self::Epic => "Epic",
            Self::Feature => "Feature",
            Self::Story => "Story",
            Self::Task => "Task",
            Self::Bug => "Bug",
            Self::Custom(value) => value,
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Embedded feature-link value.
///
/// Trackers ship this reference as an object; a link without a `key` is
/// malformed and resolves as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl FeatureLink {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
        }
    }

    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }
}

/// One issue as supplied by the snapshot reader.
///
/// The three parent-reference fields are of different kinds: a direct parent
/// key, an embedded feature link, and a plain epic key. At most one of them
/// wins during resolution (see [`crate::resolve`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRecord {
    /// Unique key, format `PROJECT-NUMBER`.
    pub key: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<IssueType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Project prefix; derived from the key when the snapshot omits it.
    #[serde(default)]
    pub project: String,

    /// Direct parent key.
    #[serde(rename = "parent", default, skip_serializing_if = "Option::is_none")]
    pub parent_ref: Option<String>,

    /// Feature link (embedded object carrying the parent key).
    #[serde(rename = "feature", default, skip_serializing_if = "Option::is_none")]
    pub feature_ref: Option<FeatureLink>,

    /// Epic link (plain key).
    #[serde(rename = "epic", default, skip_serializing_if = "Option::is_none")]
    pub epic_ref: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

impl IssueRecord {
    /// Bare record with the project derived from the key prefix.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        let project = util::project_of(&key).to_string();
        Self {
            key,
            issue_type: None,
            status: None,
            summary: None,
            project,
            parent_ref: None,
            feature_ref: None,
            epic_ref: None,
            created: None,
            updated: None,
        }
    }

    /// Distinct non-empty parent reference values across all three fields.
    ///
    /// Used by the mismatched-parents report; resolution proper only ever
    /// picks one (see [`crate::resolve::resolve_parent`]).
    #[must_use]
    pub fn parent_references(&self) -> Vec<&str> {
        let mut refs: Vec<&str> = [
            self.parent_ref.as_deref(),
            self.feature_ref.as_ref().and_then(FeatureLink::key),
            self.epic_ref.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .collect();
        refs.sort_unstable();
        refs.dedup();
        refs
    }
}

/// One node of the derived relationship graph.
///
/// A node exists for every catalog key and for every key referenced as a
/// parent. The latter, when absent from the catalog, are placeholders with
/// every field `None` except `key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub key: String,

    #[serde(rename = "type", default)]
    pub issue_type: Option<IssueType>,

    #[serde(default)]
    pub status: Option<Status>,

    #[serde(default)]
    pub summary: Option<String>,

    /// At most one parent; guaranteed to exist as a key in the assembled map.
    #[serde(default)]
    pub parent_key: Option<String>,

    /// Progress rollup, e.g. `"67%"`. `None` until progress mapping runs.
    #[serde(default)]
    pub completed: Option<String>,
}

impl Node {
    /// Synthetic node for a key referenced as a parent but not fetched.
    #[must_use]
    pub fn placeholder(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            issue_type: None,
            status: None,
            summary: None,
            parent_key: None,
            completed: None,
        }
    }

    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        self.issue_type.is_none()
            && self.status.is_none()
            && self.summary.is_none()
            && self.parent_key.is_none()
    }

    /// True when the node sits in the terminal "Closed" state.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.status == Some(Status::Closed)
    }
}

/// The derived result map, keyed by issue key.
///
/// `BTreeMap` keeps iteration deterministic for rendering and JSON output.
pub type TicketTree = BTreeMap<String, Node>;
