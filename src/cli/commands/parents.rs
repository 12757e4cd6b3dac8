//! Parents command implementation.
//!
//! Surfaces records whose reference fields name different parents; the
//! resolver will pick one by precedence, but the disagreement itself is
//! what triage wants to see.

use std::path::Path;

use anyhow::Result;

use tickettree_lib::{JsonlReader, SnapshotFilter, SnapshotReader};

use crate::cli::ParentsArgs;
use crate::format::output::PARENTS_CSV_HEADER;
use crate::format::ParentMismatch;

/// Execute the parents command.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read.
pub fn execute(args: &ParentsArgs, json: bool, data: &Path) -> Result<()> {
    let reader = JsonlReader::new(data);
    let filter = SnapshotFilter {
        project: args.project.clone(),
        key: None,
    };
    let records = reader.read_issues(&filter)?;

    let rows: Vec<ParentMismatch> = records.iter().filter_map(ParentMismatch::from_record).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        println!("{PARENTS_CSV_HEADER}");
        for row in &rows {
            println!("{}", row.to_csv_row());
        }
    }

    Ok(())
}
