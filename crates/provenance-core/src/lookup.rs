//! File version lookup: expands a path, queries git, renders a descriptor.

use std::path::{Path, PathBuf};

use crate::domain::{ProvenanceError, Result, VersionDescriptor};
use crate::expand::expand_vars;
use crate::git::{has_local_changes, parse_revision, GitCli, VersionControl};
use crate::obs;

/// Resolves [`VersionDescriptor`]s through a [`VersionControl`] backend.
#[derive(Debug, Clone, Default)]
pub struct VersionLookup<V = GitCli> {
    vcs: V,
}

impl<V: VersionControl> VersionLookup<V> {
    pub fn new(vcs: V) -> Self {
        Self { vcs }
    }

    pub fn backend(&self) -> &V {
        &self.vcs
    }

    /// Describe the version-control state of `path`.
    ///
    /// `$VAR` references are expanded first. A path that does not exist is an
    /// error and no git query is made. A failed git invocation is not an
    /// error: the result is [`VersionDescriptor::Unknown`].
    pub fn lookup(&self, path: &str) -> Result<VersionDescriptor> {
        let expanded = PathBuf::from(expand_vars(path).into_owned());
        if !expanded.exists() {
            obs::emit_path_missing(&expanded);
            return Err(ProvenanceError::PathNotFound { path: expanded });
        }

        let (repo_dir, file) = split_target(&expanded);

        let queried = self
            .vcs
            .status(&repo_dir, &file)
            .and_then(|status| self.vcs.log(&repo_dir, &file).map(|log| (status, log)));
        let (status, log) = match queried {
            Ok(outputs) => outputs,
            Err(err) => {
                obs::emit_version_unknown(&expanded, &err);
                return Ok(VersionDescriptor::Unknown);
            }
        };

        let Some(revision) = parse_revision(&log) else {
            obs::emit_revision_missing(&expanded);
            return Err(ProvenanceError::RevisionNotFound { path: expanded });
        };
        let modified = has_local_changes(&status);
        obs::emit_version_resolved(&expanded, revision, modified);

        Ok(VersionDescriptor::Tracked {
            revision: revision.to_string(),
            modified,
        })
    }
}

/// Describe `path` using the `git` binary on `PATH`.
pub fn lookup_version(path: &str) -> Result<VersionDescriptor> {
    VersionLookup::new(GitCli::new()).lookup(path)
}

/// Split a path into the directory git runs in and the file it is asked about.
fn split_target(path: &Path) -> (PathBuf, PathBuf) {
    match path.file_name() {
        Some(name) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            (dir, PathBuf::from(name))
        }
        None => (path.to_path_buf(), PathBuf::from(".")),
    }
}
