//! Shared helpers for e2e tests: a temp snapshot file plus a `tt`
//! invocation wired to it.

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

pub struct TtWorkspace {
    _dir: TempDir,
    pub data: PathBuf,
}

impl TtWorkspace {
    /// Create a workspace holding `lines` as the JSONL snapshot.
    pub fn new(lines: &str) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let data = dir.path().join("issues.jsonl");
        std::fs::write(&data, lines).expect("write snapshot");
        Self { _dir: dir, data }
    }
}

/// A `tt` command pointed at the workspace snapshot.
pub fn tt(workspace: &TtWorkspace, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("tt").expect("tt binary");
    cmd.arg("--data").arg(&workspace.data).args(args);
    cmd
}
