//! Metadata builder: assembles the provenance report for a command line.

use chrono::{Local, NaiveDateTime};

use crate::domain::{
    CommandLine, Identity, ProvenanceReport, Result, ScriptState, WorkflowState,
};
use crate::expand::expand_vars;
use crate::git::{GitCli, VersionControl};
use crate::lookup::VersionLookup;
use crate::obs;
use crate::session::{current_workflow_info, CurrentDocumentProvider};

/// Builds [`ProvenanceReport`]s from an identity, a workflow session and a
/// version-control backend.
///
/// Each build queries the session once and looks up two file versions: the
/// workflow document, then the script (`argv[0]`). Nothing is cached between
/// builds.
#[derive(Debug, Clone)]
pub struct MetadataBuilder<P, V = GitCli> {
    identity: Identity,
    session: P,
    lookup: VersionLookup<V>,
}

impl<P: CurrentDocumentProvider> MetadataBuilder<P, GitCli> {
    pub fn new(identity: Identity, session: P) -> Self {
        Self::with_lookup(identity, session, VersionLookup::default())
    }
}

impl<P: CurrentDocumentProvider, V: VersionControl> MetadataBuilder<P, V> {
    pub fn with_lookup(identity: Identity, session: P, lookup: VersionLookup<V>) -> Self {
        Self {
            identity,
            session,
            lookup,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Build the report, stamped with the current local time.
    pub fn build_metadata(&self, command_line: &CommandLine) -> Result<ProvenanceReport> {
        self.build_metadata_at(command_line, Local::now().naive_local())
    }

    /// Build the report with an explicit creation time.
    ///
    /// Any lookup or session error aborts the build; no partial report is
    /// returned.
    pub fn build_metadata_at(
        &self,
        command_line: &CommandLine,
        created: NaiveDateTime,
    ) -> Result<ProvenanceReport> {
        let _span = obs::BuildSpan::enter(command_line.script());

        let (file, node) = current_workflow_info(&self.session)?;
        let workflow_version = self.lookup.lookup(&file)?;
        let script_version = self.lookup.lookup(command_line.script())?;

        obs::emit_report_built(&file, &node, command_line.script());

        Ok(ProvenanceReport {
            identity: self.identity.clone(),
            created,
            workflow: WorkflowState {
                file,
                node,
                version: workflow_version,
            },
            script: ScriptState {
                path: expand_vars(command_line.script()).into_owned(),
                version: script_version,
            },
            command_line: command_line.clone(),
        })
    }
}

/// One-shot report text using the `git` binary on `PATH`.
pub fn build_metadata<P: CurrentDocumentProvider>(
    identity: Identity,
    session: P,
    command_line: &CommandLine,
) -> Result<String> {
    MetadataBuilder::new(identity, session)
        .build_metadata(command_line)
        .map(|report| report.to_string())
}
