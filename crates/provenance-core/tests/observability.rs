//! Observability tests for lookup and build tracing.

use std::path::Path;

use provenance_core::{
    emit_path_missing, emit_report_built, emit_revision_missing, emit_version_resolved,
    emit_version_unknown, lookup_version, BuildSpan,
};
use tracing_test::traced_test;

#[traced_test]
#[test]
fn test_emit_path_missing_logs_path() {
    emit_path_missing(Path::new("/data/missing.py"));
    assert!(logs_contain("lookup.path_missing"));
    assert!(logs_contain("/data/missing.py does not exist!"));
}

#[traced_test]
#[test]
fn test_emit_version_resolved_logs_revision() {
    emit_version_resolved(Path::new("regrid.py"), "abc123", true);
    assert!(logs_contain("lookup.resolved"));
    assert!(logs_contain("abc123"));
}

#[traced_test]
#[test]
fn test_emit_version_unknown_logs_warning() {
    let error_msg = "fatal: not a git repository";
    emit_version_unknown(Path::new("loose.py"), &error_msg);
    assert!(logs_contain("lookup.unknown"));
    assert!(logs_contain("not a git repository"));
}

#[traced_test]
#[test]
fn test_emit_revision_missing_logs_path() {
    emit_revision_missing(Path::new("new.py"));
    assert!(logs_contain("lookup.revision_missing"));
}

#[traced_test]
#[test]
fn test_emit_report_built_logs_workflow_node() {
    emit_report_built("cmip5.vt", "42", "regrid.py");
    assert!(logs_contain("report.built"));
    assert!(logs_contain("cmip5.vt"));
}

#[traced_test]
#[test]
fn test_build_span_enter_creates_span() {
    let span = BuildSpan::enter("regrid.py");
    tracing::info!("inside build span");
    drop(span);
    assert!(logs_contain("inside build span"));
}

#[traced_test]
#[test]
fn test_missing_path_lookup_is_logged_before_error() {
    let result = lookup_version("/definitely/not/here.py");
    assert!(result.is_err());
    assert!(logs_contain("/definitely/not/here.py does not exist!"));
}
