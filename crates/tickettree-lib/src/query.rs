//! Option and filter types for tree operations.

/// Options controlling tree construction.
#[derive(Debug, Clone)]
pub struct TreeOptions {
    /// Restrict the result to this key plus its ancestors and descendants.
    pub filter_key: Option<String>,
    /// Restrict the result to keys with this project prefix plus their
    /// ancestors and descendants.
    pub filter_project: Option<String>,
    /// Keep nodes in the terminal "Closed" state in the result.
    pub show_closed: bool,
    /// Compute the percent-complete rollup. Off by default; the descendant
    /// closure is the expensive part of a build.
    pub map_progress: bool,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            filter_key: None,
            filter_project: None,
            show_closed: true,
            map_progress: false,
        }
    }
}

impl TreeOptions {
    /// Options scoped to a single key.
    #[must_use]
    pub fn for_key(key: impl Into<String>) -> Self {
        Self {
            filter_key: Some(key.into()),
            ..Self::default()
        }
    }

    /// Options scoped to a project prefix.
    #[must_use]
    pub fn for_project(project: impl Into<String>) -> Self {
        Self {
            filter_project: Some(project.into()),
            ..Self::default()
        }
    }
}

/// Filters accepted by the snapshot reader boundary.
#[derive(Debug, Clone, Default)]
pub struct SnapshotFilter {
    /// Exact project match.
    pub project: Option<String>,
    /// Keep records that reference this key through any parent field.
    pub key: Option<String>,
}

impl SnapshotFilter {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.project.is_none() && self.key.is_none()
    }
}
