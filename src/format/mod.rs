//! Output formatting for `tt`.
//!
//! `text` renders trees for terminals; `output` holds the serializable
//! report shapes shared by the text and JSON paths.

pub mod output;
pub mod text;

pub use output::ParentMismatch;
pub use text::{format_node_line, render_tree};
