use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Isolated home for one test: a throwaway data directory and a config
/// path that does not exist, so built-in defaults apply.
pub struct TestHome {
    dir: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("td.toml")
    }
}

pub fn td_cmd(home: &TestHome) -> Command {
    let mut cmd = Command::cargo_bin("td").expect("binary");
    cmd.env("TD_DATA_DIR", home.data_dir());
    cmd.env("TD_CONFIG", home.config_path());
    cmd.env_remove("RUST_LOG");
    cmd
}
