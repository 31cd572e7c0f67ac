//! Workflow-session query: which workflow document is open, at which node.
//!
//! The authoring host is an external collaborator; it is reached through the
//! [`CurrentDocumentProvider`] capability so that builders can be wired to a
//! live host adapter in production and to [`StaticDocument`] elsewhere.

use crate::domain::{ProvenanceError, Result};

/// Access to the workflow document currently open in the host session.
pub trait CurrentDocumentProvider {
    /// Storage name (path) of the active document.
    fn name(&self) -> Result<String>;

    /// Current revision (version node) of the active document.
    fn revision(&self) -> Result<String>;
}

impl<P: CurrentDocumentProvider + ?Sized> CurrentDocumentProvider for &P {
    fn name(&self) -> Result<String> {
        (**self).name()
    }

    fn revision(&self) -> Result<String> {
        (**self).revision()
    }
}

impl<P: CurrentDocumentProvider + ?Sized> CurrentDocumentProvider for Box<P> {
    fn name(&self) -> Result<String> {
        (**self).name()
    }

    fn revision(&self) -> Result<String> {
        (**self).revision()
    }
}

/// Read the active document's name and revision. Provider errors pass through.
pub fn current_workflow_info<P>(provider: &P) -> Result<(String, String)>
where
    P: CurrentDocumentProvider + ?Sized,
{
    Ok((provider.name()?, provider.revision()?))
}

/// A document fixed at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticDocument {
    name: String,
    revision: String,
}

impl StaticDocument {
    pub fn new(name: impl Into<String>, revision: impl ToString) -> Self {
        Self {
            name: name.into(),
            revision: revision.to_string(),
        }
    }
}

impl CurrentDocumentProvider for StaticDocument {
    fn name(&self) -> Result<String> {
        Ok(self.name.clone())
    }

    fn revision(&self) -> Result<String> {
        Ok(self.revision.clone())
    }
}

/// Provider for callers running outside any workflow host.
#[derive(Debug, Clone, Default)]
pub struct NoActiveSession {
    reason: Option<String>,
}

impl NoActiveSession {
    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
        }
    }

    fn unavailable(&self) -> ProvenanceError {
        ProvenanceError::SessionUnavailable(
            self.reason
                .clone()
                .unwrap_or_else(|| "no workflow controller is active".to_string()),
        )
    }
}

impl CurrentDocumentProvider for NoActiveSession {
    fn name(&self) -> Result<String> {
        Err(self.unavailable())
    }

    fn revision(&self) -> Result<String> {
        Err(self.unavailable())
    }
}
