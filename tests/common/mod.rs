use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

/// A throwaway data directory plus a command builder pointed at it
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn tally(&self) -> Command {
        let mut cmd = Command::cargo_bin("tally").unwrap();
        cmd.arg("--data-dir")
            .arg(self.path())
            .env_remove("TALLY_DATA_DIR")
            .env_remove("TALLY_LOG");
        cmd
    }
}
