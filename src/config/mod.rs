//! Configuration for the `tt` binary.
//!
//! The only configurable piece is where the snapshot lives. Resolution
//! order: `--data` flag, `TICKETTREE_DATA` environment variable, then the
//! workspace default `.tickettree/issues.jsonl`.

use std::path::PathBuf;

/// Environment variable overriding the snapshot path.
pub const DATA_ENV: &str = "TICKETTREE_DATA";

/// Default snapshot location relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = ".tickettree/issues.jsonl";

/// Resolve the snapshot path from flag, environment, or default.
#[must_use]
pub fn resolve_data_path(flag: Option<PathBuf>) -> PathBuf {
    if let Some(path) = flag {
        return path;
    }
    if let Some(path) = std::env::var_os(DATA_ENV) {
        return PathBuf::from(path);
    }
    PathBuf::from(DEFAULT_DATA_PATH)
}
