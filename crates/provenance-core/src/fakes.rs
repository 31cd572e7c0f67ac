//! Scripted version-control backend for tests.
//!
//! `ScriptedVcs` answers `status`/`log` from canned per-file responses and
//! records every query, so callers can assert which directory and file git
//! would have been asked about.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::git::{GitInvocationError, VersionControl};

/// Canned state of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedFile {
    Tracked { revision: String, modified: bool },
    /// Inside a repository but never committed.
    Untracked,
    /// git exits non-zero (not a repository).
    Unavailable,
}

impl ScriptedFile {
    pub fn clean(revision: &str) -> Self {
        Self::Tracked {
            revision: revision.to_string(),
            modified: false,
        }
    }

    pub fn modified(revision: &str) -> Self {
        Self::Tracked {
            revision: revision.to_string(),
            modified: true,
        }
    }
}

/// One recorded query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcsCall {
    pub query: &'static str,
    pub repo_dir: PathBuf,
    pub file: PathBuf,
}

/// In-memory [`VersionControl`] keyed by file name.
///
/// Files without a scripted response behave as [`ScriptedFile::Unavailable`].
#[derive(Debug, Default)]
pub struct ScriptedVcs {
    files: HashMap<PathBuf, ScriptedFile>,
    calls: Mutex<Vec<VcsCall>>,
}

impl ScriptedVcs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, name: impl Into<PathBuf>, state: ScriptedFile) -> Self {
        self.files.insert(name.into(), state);
        self
    }

    pub fn calls(&self) -> Vec<VcsCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, query: &'static str, repo_dir: &Path, file: &Path) -> ScriptedFile {
        self.calls.lock().unwrap().push(VcsCall {
            query,
            repo_dir: repo_dir.to_path_buf(),
            file: file.to_path_buf(),
        });
        self.files
            .get(file)
            .cloned()
            .unwrap_or(ScriptedFile::Unavailable)
    }
}

fn not_a_repository(query: &str) -> GitInvocationError {
    GitInvocationError::Failed {
        args: query.to_string(),
        code: Some(128),
        stderr: "fatal: not a git repository (or any of the parent directories): .git"
            .to_string(),
    }
}

impl VersionControl for ScriptedVcs {
    fn status(&self, repo_dir: &Path, file: &Path) -> Result<String, GitInvocationError> {
        match self.record("status", repo_dir, file) {
            ScriptedFile::Tracked { modified: true, .. } => {
                Ok(format!(" M {}\n", file.display()))
            }
            ScriptedFile::Tracked { modified: false, .. } => Ok(String::new()),
            ScriptedFile::Untracked => Ok(format!("?? {}\n", file.display())),
            ScriptedFile::Unavailable => Err(not_a_repository("status")),
        }
    }

    fn log(&self, repo_dir: &Path, file: &Path) -> Result<String, GitInvocationError> {
        match self.record("log", repo_dir, file) {
            ScriptedFile::Tracked { revision, .. } => Ok(format!("commit {revision}\n")),
            ScriptedFile::Untracked => Ok(String::new()),
            ScriptedFile::Unavailable => Err(not_a_repository("log")),
        }
    }
}
