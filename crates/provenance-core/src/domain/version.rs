//! Version descriptors: the one-line version-control summary of a file.

use serde::{Deserialize, Serialize};

/// Text emitted when the version-control tool could not be invoked for a path.
pub const UNKNOWN_VERSION: &str = "Could not determine file version.";

/// One-line description of a file's version-control state.
///
/// The `Display` form is the wire format embedded in provenance reports;
/// downstream consumers match on it, including the historical spelling of
/// "uncommited".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum VersionDescriptor {
    /// File is tracked; `modified` is set when the working tree has local edits.
    Tracked { revision: String, modified: bool },
    /// The version-control query itself failed (not a repository, tool missing).
    Unknown,
}

impl VersionDescriptor {
    pub fn clean(revision: impl Into<String>) -> Self {
        Self::Tracked {
            revision: revision.into(),
            modified: false,
        }
    }

    pub fn modified(revision: impl Into<String>) -> Self {
        Self::Tracked {
            revision: revision.into(),
            modified: true,
        }
    }

    /// Revision identifier, when known.
    pub fn revision(&self) -> Option<&str> {
        match self {
            Self::Tracked { revision, .. } => Some(revision),
            Self::Unknown => None,
        }
    }

    pub fn is_modified(&self) -> bool {
        matches!(self, Self::Tracked { modified: true, .. })
    }
}

impl std::fmt::Display for VersionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tracked {
                revision,
                modified: true,
            } => write!(f, "Git info: {revision} - with uncommited modifications"),
            Self::Tracked {
                revision,
                modified: false,
            } => write!(f, "Git info: {revision}"),
            Self::Unknown => f.write_str(UNKNOWN_VERSION),
        }
    }
}
