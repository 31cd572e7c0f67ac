//! Git integration: the two read-only queries behind a file version lookup.
//!
//! Every query takes the repository directory explicitly (`git -C <dir>`),
//! so lookups never touch the process working directory. File arguments are
//! literal paths (`--literal-pathspecs`): `[ab].py` names one file, not a glob.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

use regex::Regex;

/// A git invocation that could not be completed.
///
/// Lookups recover from this by reporting the file version as unknown.
#[derive(Debug, thiserror::Error)]
pub enum GitInvocationError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {args} exited with {code:?}: {stderr}")]
    Failed {
        args: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// Read-only version-control queries against a single file.
pub trait VersionControl {
    /// Working-tree status of `file` in porcelain v1 format.
    fn status(&self, repo_dir: &Path, file: &Path) -> Result<String, GitInvocationError>;

    /// Most recent log entry touching `file`, starting with `commit <id>`.
    fn log(&self, repo_dir: &Path, file: &Path) -> Result<String, GitInvocationError>;
}

/// Production backend: shells out to the `git` binary.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            program: PathBuf::from("git"),
        }
    }
}

impl GitCli {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific git executable instead of the one on `PATH`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(
        &self,
        repo_dir: &Path,
        args: &[&str],
        file: &Path,
    ) -> Result<String, GitInvocationError> {
        let output = Command::new(&self.program)
            .arg("-C")
            .arg(repo_dir)
            .arg("--literal-pathspecs")
            .args(args)
            .arg("--")
            .arg(file)
            .output()
            .map_err(|source| GitInvocationError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(GitInvocationError::Failed {
                args: args.join(" "),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl VersionControl for GitCli {
    fn status(&self, repo_dir: &Path, file: &Path) -> Result<String, GitInvocationError> {
        self.run(repo_dir, &["status", "--porcelain"], file)
    }

    fn log(&self, repo_dir: &Path, file: &Path) -> Result<String, GitInvocationError> {
        self.run(repo_dir, &["log", "-n", "1", "--format=commit %H"], file)
    }
}

fn commit_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?m)^commit (\S+)").expect("static pattern compiles"))
}

/// Revision id from the first `commit <id>` line of log output.
///
/// Accepts both the `--format=commit %H` output used by [`GitCli`] and the
/// default free-text `git log` layout.
pub fn parse_revision(log: &str) -> Option<&str> {
    commit_pattern()
        .captures(log)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Whether porcelain status output reports a change to a tracked file.
pub fn has_local_changes(status: &str) -> bool {
    status
        .lines()
        .filter(|line| line.len() > 3)
        .any(|line| !line.starts_with("??") && !line.starts_with("!!"))
}
