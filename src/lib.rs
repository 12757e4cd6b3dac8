//! `tickettree_rust` - Issue hierarchy and progress rollup
//!
//! CLI shell for the `tt` tool. The graph engine itself lives in
//! `tickettree-lib`; this crate adds argument parsing, output formatting,
//! and the status-consistency linter.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Snapshot path resolution
//! - [`format`] - Output formatting (text, JSON, CSV)
//! - [`lint`] - Status-consistency rules over built trees
//! - [`logging`] - tracing subscriber setup

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod format;
pub mod lint;
pub mod logging;

use clap::Parser;

use crate::cli::{Cli, Commands};

/// Run the CLI application.
///
/// This is the main entry point called from `main()`.
///
/// # Errors
///
/// Returns an error if command execution fails.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let data = config::resolve_data_path(cli.data.clone());

    match &cli.command {
        Commands::Tree(args) => cli::commands::tree::execute(args, cli.json, &data),
        Commands::Children(args) => cli::commands::children::execute(args, cli.json, &data),
        Commands::Lint(args) => cli::commands::lint::execute(args, cli.json, &data),
        Commands::Parents(args) => cli::commands::parents::execute(args, cli.json, &data),
    }
}
