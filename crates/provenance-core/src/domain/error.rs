//! Error taxonomy for provenance lookups and report building.

use std::path::PathBuf;

/// Provenance domain errors.
///
/// A failed version-control invocation is not represented here: it is
/// recovered inside the lookup and rendered as
/// [`VersionDescriptor::Unknown`](crate::VersionDescriptor::Unknown).
#[derive(Debug, thiserror::Error)]
pub enum ProvenanceError {
    #[error("{} does not exist!", .path.display())]
    PathNotFound { path: PathBuf },

    #[error("no `commit <id>` entry in git log output for {}", .path.display())]
    RevisionNotFound { path: PathBuf },

    #[error("no active workflow session: {0}")]
    SessionUnavailable(String),

    #[error("command line must contain at least the script path")]
    EmptyCommandLine,
}

/// Result type for provenance operations.
pub type Result<T> = std::result::Result<T, ProvenanceError>;
