//! Command-line interface for `tickettree_rust`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// `tickettree_rust` (tt) - Issue hierarchy and progress rollup.
#[derive(Parser, Debug)]
#[command(name = "tt")]
#[command(
    author,
    version,
    about = "Issue-tracker hierarchy and progress rollup",
    long_about = None,
    after_help = "Reads a JSONL snapshot; never talks to a tracker itself."
)]
pub struct Cli {
    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Snapshot file (default: TICKETTREE_DATA or .tickettree/issues.jsonl)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Full relationship tree
    Tree(TreeArgs),

    /// Child subtree of a key or project
    Children(TreeArgs),

    /// Status-consistency checks
    Lint(LintArgs),

    /// Records with conflicting parent references (CSV)
    Parents(ParentsArgs),
}

/// Scope and rendering options shared by tree and children.
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Restrict to this key plus its ancestors and descendants
    #[arg(long)]
    pub key: Option<String>,

    /// Restrict to this project prefix
    #[arg(long)]
    pub project: Option<String>,

    /// Keep Closed issues in the result
    #[arg(long)]
    pub show_closed: bool,

    /// Compute the percent-complete rollup
    #[arg(long)]
    pub map_progress: bool,
}

/// Lint scope.
#[derive(Args, Debug)]
pub struct LintArgs {
    /// Lint a single key
    #[arg(long)]
    pub key: Option<String>,

    /// Lint every open issue in a project
    #[arg(long)]
    pub project: Option<String>,
}

/// Mismatched-parents report scope.
#[derive(Args, Debug)]
pub struct ParentsArgs {
    /// Restrict to one project
    #[arg(long)]
    pub project: Option<String>,
}
