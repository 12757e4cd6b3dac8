//! Lint command implementation.

use std::path::Path;

use anyhow::{bail, Result};

use tickettree_lib::util::sort_issue_keys;
use tickettree_lib::{JsonlReader, Snapshot};

use crate::cli::LintArgs;
use crate::lint::{collect_keys, lint_key, LintFinding};

/// Execute the lint command.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read or no scope was given.
pub fn execute(args: &LintArgs, json: bool, data: &Path) -> Result<()> {
    if args.key.is_none() && args.project.is_none() {
        bail!("lint needs --key or --project");
    }

    let reader = JsonlReader::new(data);
    let snapshot = Snapshot::load(&reader)?;

    let mut keys = Vec::new();
    if let Some(key) = &args.key {
        keys.push(key.clone());
    }
    if let Some(project) = &args.project {
        keys.extend(collect_keys(snapshot.records(), project));
    }
    let keys = sort_issue_keys(keys);

    let findings: Vec<LintFinding> = keys
        .iter()
        .flat_map(|key| lint_key(snapshot.records(), key))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&findings)?);
    } else if findings.is_empty() {
        println!("{} key(s) linted, no findings", keys.len());
    } else {
        for finding in &findings {
            println!("[RULE {}] {} {}", finding.rule, finding.key, finding.message);
        }
        println!("\n{} finding(s)", findings.len());
    }

    Ok(())
}
