//! Tree command implementation.

use std::path::Path;

use anyhow::Result;

use tickettree_lib::{build_tree, JsonlReader, Snapshot, TicketTree, TreeOptions};

use crate::cli::TreeArgs;
use crate::format::render_tree;

/// Execute the tree command.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read.
pub fn execute(args: &TreeArgs, json: bool, data: &Path) -> Result<()> {
    let reader = JsonlReader::new(data);
    let snapshot = Snapshot::load(&reader)?;

    let tree = build_tree(snapshot.records(), &options_from(args));
    print_tree(&tree, &snapshot, json)?;
    Ok(())
}

pub(crate) fn options_from(args: &TreeArgs) -> TreeOptions {
    TreeOptions {
        filter_key: args.key.clone(),
        filter_project: args.project.clone(),
        show_closed: args.show_closed,
        map_progress: args.map_progress,
    }
}

pub(crate) fn print_tree(tree: &TicketTree, snapshot: &Snapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(tree)?);
        return Ok(());
    }

    if let Some(stamp) = snapshot.latest_update() {
        println!("Snapshot as of {}", stamp.format("%Y-%m-%d %H:%M UTC"));
    }
    print!("{}", render_tree(tree));
    println!("\n{} node(s)", tree.len());
    Ok(())
}
