//! Provenance Core Library
//!
//! Builds provenance reports that tag data-processing outputs with who ran
//! what: user and project, a timestamp, the workflow document and its node,
//! and the git state of both the workflow document and the executed script.
//!
//! ```no_run
//! use provenance_core::{CommandLine, Identity, MetadataBuilder, StaticDocument};
//!
//! let builder = MetadataBuilder::new(
//!     Identity::from_env(),
//!     StaticDocument::new("$HOME/workflows/cmip5.vt", 42),
//! );
//! let cmd = CommandLine::new(["$HOME/bin/regrid.py", "in.nc", "out.nc"])?;
//! println!("{}", builder.build_metadata(&cmd)?);
//! # Ok::<(), provenance_core::ProvenanceError>(())
//! ```

pub mod builder;
pub mod domain;
pub mod expand;
pub mod fakes;
pub mod git;
pub mod lookup;
pub mod obs;
pub mod session;
pub mod telemetry;

pub use builder::{build_metadata, MetadataBuilder};
pub use domain::{
    iso_timestamp, CommandLine, Identity, ProvenanceError, ProvenanceReport, Result, ScriptState,
    VersionDescriptor, WorkflowState, UNKNOWN_VERSION,
};
pub use expand::{expand_vars, expand_vars_with};
pub use git::{GitCli, GitInvocationError, VersionControl};
pub use lookup::{lookup_version, VersionLookup};
pub use obs::{
    emit_path_missing, emit_report_built, emit_revision_missing, emit_version_resolved,
    emit_version_unknown, BuildSpan,
};
pub use session::{current_workflow_info, CurrentDocumentProvider, NoActiveSession, StaticDocument};
pub use telemetry::init_tracing;
