//! Domain models for provenance reports.
//!
//! - `CommandLine`: the argv being documented
//! - `VersionDescriptor`: one-line version-control state of a file
//! - `Identity`: user and project strings
//! - `ProvenanceReport`: the assembled four-line record

pub mod command_line;
pub mod error;
pub mod identity;
pub mod report;
pub mod version;

pub use command_line::CommandLine;
pub use error::{ProvenanceError, Result};
pub use identity::Identity;
pub use report::{iso_timestamp, ProvenanceReport, ScriptState, WorkflowState};
pub use version::{VersionDescriptor, UNKNOWN_VERSION};
