//! The provenance report and its fixed text layout.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use super::command_line::CommandLine;
use super::identity::Identity;
use super::version::VersionDescriptor;

/// Workflow document state at the time the report was built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowState {
    pub file: String,
    pub node: String,
    pub version: VersionDescriptor,
}

/// Script state at the time the report was built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptState {
    /// Script path after environment expansion.
    pub path: String,
    pub version: VersionDescriptor,
}

/// Four-line provenance record for an output artifact.
///
/// `Display` renders the exact report text:
///
/// ```text
/// user: <USER> nci project: <PROJECT> time created: <timestamp>
/// vt file: <file> vt file node: <node> vt file version: <version>
/// script executed: <script> script file version: <version>
/// full command line: <argv joined by spaces>
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenanceReport {
    pub identity: Identity,
    pub created: NaiveDateTime,
    pub workflow: WorkflowState,
    pub script: ScriptState,
    pub command_line: CommandLine,
}

impl ProvenanceReport {
    /// Creation time as ISO-8601 without a timezone suffix.
    pub fn created_iso(&self) -> String {
        iso_timestamp(&self.created)
    }
}

impl std::fmt::Display for ProvenanceReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "user: {} nci project: {} time created: {}",
            self.identity.user,
            self.identity.project,
            self.created_iso()
        )?;
        writeln!(
            f,
            "vt file: {} vt file node: {} vt file version: {}",
            self.workflow.file, self.workflow.node, self.workflow.version
        )?;
        writeln!(
            f,
            "script executed: {} script file version: {}",
            self.script.path, self.script.version
        )?;
        write!(f, "full command line: {}", self.command_line)
    }
}

/// `YYYY-MM-DDTHH:MM:SS`, with `.ffffff` only when microseconds are non-zero.
pub fn iso_timestamp(ts: &NaiveDateTime) -> String {
    if ts.nanosecond() / 1_000 == 0 {
        ts.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        ts.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}
