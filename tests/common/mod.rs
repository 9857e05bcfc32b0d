//! Shared test infrastructure for integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Scratch directory holding input documents for one CLI run.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn create() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` under the workspace and return its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("write fixture");
        path
    }
}

/// Run the `specbind` binary with `args`.
pub fn specbind(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_specbind"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run specbind")
}

/// Parse stdout of a successful run as JSON.
pub fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "specbind failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("parse stdout JSON")
}
