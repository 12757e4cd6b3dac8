//! `tickettree-lib` — Issue relationship graph and progress rollup.
//!
//! Derives a parent/child hierarchy from a flat issue-tracker snapshot:
//! each issue's single parent is resolved from several competing reference
//! fields, the catalog is assembled into a closed `key -> node` map
//! (placeholders stand in for referenced-but-unfetched parents), and a
//! percent-complete rollup is derived from every node's transitive
//! descendant set. Pure in-memory: the only I/O lives behind the
//! [`SnapshotReader`] boundary.
//!
//! # Quick Start
//!
//! ```
//! use tickettree_lib::{build_tree, IssueRecord, Status, TreeOptions};
//!
//! let mut epic = IssueRecord::new("AAH-1");
//! epic.status = Some(Status::InProgress);
//! let mut story = IssueRecord::new("AAH-2");
//! story.status = Some(Status::Closed);
//! story.parent_ref = Some("AAH-1".to_string());
//!
//! let options = TreeOptions { map_progress: true, ..TreeOptions::default() };
//! let tree = build_tree(&[epic, story], &options);
//!
//! assert_eq!(tree["AAH-2"].parent_key.as_deref(), Some("AAH-1"));
//! assert_eq!(tree["AAH-1"].completed.as_deref(), Some("100%"));
//! ```

pub mod error;
pub mod model;
pub mod query;
pub mod resolve;
pub mod snapshot;
pub mod tree;
pub mod util;

pub use error::{Result, TreeError};
pub use model::{FeatureLink, IssueRecord, IssueType, Node, Status, TicketTree};
pub use query::{SnapshotFilter, TreeOptions};
pub use resolve::resolve_parent;
pub use snapshot::{JsonlReader, Snapshot, SnapshotReader};
pub use tree::{assemble, build_child_subtree, build_tree, descendants};
