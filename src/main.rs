//! `tickettree_rust` (tt) - Issue hierarchy and progress rollup
//!
//! Derives the epic/feature/story tree and percent-complete rollup from a
//! JSONL issue snapshot. Read-only: no tracker access, no database.

use tickettree_rust::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
