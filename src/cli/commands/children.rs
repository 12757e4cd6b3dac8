//! Children command implementation.
//!
//! The strict-descendants view: the root, everything below it, nothing
//! above it.

use std::path::Path;

use anyhow::Result;

use tickettree_lib::{build_child_subtree, JsonlReader, Snapshot};

use crate::cli::TreeArgs;
use crate::cli::commands::tree::{options_from, print_tree};

/// Execute the children command.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read, or if `--key` names a
/// root absent from the extracted subtree.
pub fn execute(args: &TreeArgs, json: bool, data: &Path) -> Result<()> {
    let reader = JsonlReader::new(data);
    let snapshot = Snapshot::load(&reader)?;

    let tree = build_child_subtree(snapshot.records(), &options_from(args), None)?;
    print_tree(&tree, &snapshot, json)?;
    Ok(())
}
