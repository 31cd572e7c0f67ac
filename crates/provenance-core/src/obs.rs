//! Structured observability hooks for version lookups and report builds.
//!
//! Events are emitted through `tracing` with an `event` field naming the
//! lifecycle step; filter with `RUST_LOG` (see [`crate::telemetry`]).

use std::path::Path;

use tracing::{debug, error, info, warn};

/// RAII guard that enters a span tagged with the script being documented.
pub struct BuildSpan {
    _span: tracing::span::EnteredSpan,
}

impl BuildSpan {
    pub fn enter(script: &str) -> Self {
        let span = tracing::info_span!("provenance.build", script = %script);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: a lookup target does not exist.
pub fn emit_path_missing(path: &Path) {
    error!(event = "lookup.path_missing", path = %path.display(), "{} does not exist!", path.display());
}

/// Emit event: revision and modification state resolved for a file.
pub fn emit_version_resolved(path: &Path, revision: &str, modified: bool) {
    debug!(
        event = "lookup.resolved",
        path = %path.display(),
        revision = %revision,
        modified = modified,
    );
}

/// Emit event: git could not be invoked; the version is reported as unknown.
pub fn emit_version_unknown(path: &Path, error: &dyn std::fmt::Display) {
    warn!(event = "lookup.unknown", path = %path.display(), error = %error);
}

/// Emit event: git log had no `commit <id>` entry for a file.
pub fn emit_revision_missing(path: &Path) {
    error!(event = "lookup.revision_missing", path = %path.display());
}

/// Emit event: provenance report assembled.
pub fn emit_report_built(workflow_file: &str, workflow_node: &str, script: &str) {
    info!(
        event = "report.built",
        workflow_file = %workflow_file,
        workflow_node = %workflow_node,
        script = %script,
    );
}
