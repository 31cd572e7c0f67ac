//! Scratch git repositories for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

pub fn run_git(repo_dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Repository with `scripts/regrid.py` and `workflows/cmip5.vt` committed.
pub struct ScratchRepo {
    pub dir: tempfile::TempDir,
}

impl ScratchRepo {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        run_git(dir.path(), &["init"]);
        run_git(dir.path(), &["config", "user.name", "test-user"]);
        run_git(dir.path(), &["config", "user.email", "test@example.com"]);
        run_git(dir.path(), &["config", "commit.gpgsign", "false"]);

        std::fs::create_dir_all(dir.path().join("scripts")).unwrap();
        std::fs::create_dir_all(dir.path().join("workflows")).unwrap();
        std::fs::write(dir.path().join("scripts/regrid.py"), "print('v1')\n").unwrap();
        std::fs::write(dir.path().join("workflows/cmip5.vt"), "<vistrail/>\n").unwrap();
        run_git(dir.path(), &["add", "."]);
        run_git(dir.path(), &["commit", "-m", "initial"]);

        Self { dir }
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn path_str(&self, rel: &str) -> String {
        self.path(rel).to_string_lossy().into_owned()
    }

    pub fn head(&self) -> String {
        run_git(self.dir.path(), &["rev-parse", "HEAD"])
    }

    pub fn commit_all(&self, message: &str) -> String {
        run_git(self.dir.path(), &["commit", "-am", message]);
        self.head()
    }
}
