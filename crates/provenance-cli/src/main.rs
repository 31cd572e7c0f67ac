//! Provenance CLI
//!
//! The `provenance` command tags pipeline outputs with a provenance report.
//!
//! ## Commands
//!
//! - `version`: Show the git version descriptor of a file
//! - `build`: Print the provenance report for a command line
//! - `run`: Build the report, then execute the command

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use provenance_core::{
    lookup_version, CommandLine, CurrentDocumentProvider, Identity, MetadataBuilder,
    NoActiveSession, ProvenanceReport, StaticDocument,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, Level};

#[derive(Parser)]
#[command(name = "provenance")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Provenance reports for data-processing outputs", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(flatten)]
    identity: IdentityArgs,

    #[command(flatten)]
    workflow: WorkflowArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct IdentityArgs {
    /// User name recorded in the report [default: $USER]
    #[arg(long, global = true)]
    user: Option<String>,

    /// Compute project recorded in the report [default: $PROJECT]
    #[arg(long, global = true)]
    project: Option<String>,
}

impl IdentityArgs {
    /// Flags win; anything not given falls back to the environment.
    fn resolve(self) -> Identity {
        let mut identity = Identity::from_env();
        if let Some(user) = self.user {
            identity.user = user;
        }
        if let Some(project) = self.project {
            identity.project = project;
        }
        identity
    }
}

#[derive(Args, Debug, Clone)]
struct WorkflowArgs {
    /// Workflow document the command belongs to
    #[arg(long, global = true, env = "PROVENANCE_WORKFLOW_FILE", requires = "workflow_node")]
    workflow_file: Option<String>,

    /// Version node of the workflow document
    #[arg(long, global = true, env = "PROVENANCE_WORKFLOW_NODE")]
    workflow_node: Option<String>,
}

impl WorkflowArgs {
    fn session(&self) -> Box<dyn CurrentDocumentProvider> {
        match (&self.workflow_file, &self.workflow_node) {
            (Some(file), Some(node)) => Box::new(StaticDocument::new(file.clone(), node)),
            _ => Box::new(NoActiveSession::with_reason(
                "pass --workflow-file and --workflow-node (or set PROVENANCE_WORKFLOW_FILE)",
            )),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the git version of a file
    Version {
        /// File path ($VAR references are expanded)
        path: String,
    },

    /// Print the provenance report for a command line
    Build {
        /// Emit the report as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Command line being documented: script followed by its arguments
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Build the report, then run the command with inherited stdio
    Run {
        /// Write the report to a file (default: stderr)
        #[arg(long)]
        report: Option<PathBuf>,

        /// Command to execute: script followed by its arguments
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    provenance_core::init_tracing(cli.json_logs, level);

    let builder = MetadataBuilder::new(cli.identity.resolve(), cli.workflow.session());

    match cli.command {
        Commands::Version { path } => cmd_version(&path).map(|()| ExitCode::SUCCESS),
        Commands::Build {
            json,
            output,
            command,
        } => cmd_build(&builder, command, json, output.as_deref()).map(|()| ExitCode::SUCCESS),
        Commands::Run { report, command } => cmd_run(&builder, command, report.as_deref()),
    }
}

/// Print the version descriptor of a file
fn cmd_version(path: &str) -> Result<()> {
    let version =
        lookup_version(path).with_context(|| format!("Failed to determine version of {path}"))?;
    println!("{version}");
    Ok(())
}

fn build_report<P: CurrentDocumentProvider>(
    builder: &MetadataBuilder<P>,
    command: Vec<String>,
) -> Result<ProvenanceReport> {
    let command_line = CommandLine::new(command)?;
    let identity = builder.identity();
    debug!(user = %identity.user, project = %identity.project, "Building provenance report");
    builder
        .build_metadata(&command_line)
        .with_context(|| format!("Failed to build provenance for `{command_line}`"))
}

/// Build and emit the provenance report
fn cmd_build<P: CurrentDocumentProvider>(
    builder: &MetadataBuilder<P>,
    command: Vec<String>,
    json: bool,
    output: Option<&Path>,
) -> Result<()> {
    let report = build_report(builder, command)?;
    let text = render(&report, json)?;

    match output {
        Some(path) => {
            write_report(path, &text)?;
            info!(path = %path.display(), "Provenance report written");
        }
        None => println!("{text}"),
    }
    Ok(())
}

/// Build the report, then execute the documented command
fn cmd_run<P: CurrentDocumentProvider>(
    builder: &MetadataBuilder<P>,
    command: Vec<String>,
    report_path: Option<&Path>,
) -> Result<ExitCode> {
    let report = build_report(builder, command)?;
    let text = report.to_string();

    match report_path {
        Some(path) => write_report(path, &text)?,
        None => eprintln!("{text}"),
    }

    let status = std::process::Command::new(&report.script.path)
        .args(report.command_line.args())
        .status()
        .with_context(|| format!("Failed to execute {}", report.script.path))?;

    info!(status = %status, "Command finished");
    Ok(exit_code(status.code()))
}

fn render(report: &ProvenanceReport, json: bool) -> Result<String> {
    if json {
        serde_json::to_string_pretty(report).context("Failed to serialize report")
    } else {
        Ok(report.to_string())
    }
}

fn write_report(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, format!("{text}\n"))
        .with_context(|| format!("Failed to write report to {}", path.display()))
}

/// Child exit status as our own; termination by signal maps to 1.
fn exit_code(code: Option<i32>) -> ExitCode {
    code.and_then(|c| u8::try_from(c).ok())
        .map(ExitCode::from)
        .unwrap_or(ExitCode::FAILURE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::process::Command as StdCommand;

    fn run_git(repo_dir: &Path, args: &[&str]) {
        let output = StdCommand::new("git")
            .args(args)
            .current_dir(repo_dir)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    fn make_repo() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        run_git(dir.path(), &["init"]);
        run_git(dir.path(), &["config", "user.name", "test-user"]);
        run_git(dir.path(), &["config", "user.email", "test@example.com"]);
        run_git(dir.path(), &["config", "commit.gpgsign", "false"]);
        std::fs::write(dir.path().join("demo.vt"), "<vistrail/>\n").unwrap();
        std::fs::write(dir.path().join("tool.sh"), "#!/bin/sh\nexit 3\n").unwrap();
        run_git(dir.path(), &["add", "."]);
        run_git(dir.path(), &["commit", "-m", "initial"]);
        dir
    }

    fn path_str(dir: &tempfile::TempDir, name: &str) -> String {
        dir.path().join(name).to_string_lossy().into_owned()
    }

    #[test]
    fn test_cli_parses_build_with_hyphen_arguments() {
        let cli = Cli::try_parse_from([
            "provenance",
            "--user",
            "alice",
            "--project",
            "p00",
            "build",
            "--json",
            "cdo",
            "-f",
            "nc",
            "in.nc",
        ])
        .unwrap();

        assert_eq!(cli.identity.clone().resolve(), Identity::new("alice", "p00"));
        match cli.command {
            Commands::Build { json, command, .. } => {
                assert!(json);
                assert_eq!(command, ["cdo", "-f", "nc", "in.nc"]);
            }
            _ => panic!("expected build"),
        }
    }

    #[test]
    fn test_cli_build_requires_command() {
        assert!(Cli::try_parse_from(["provenance", "build"]).is_err());
    }

    #[test]
    fn test_workflow_file_requires_node() {
        // Detach the node flag from its environment variable so the outcome
        // does not depend on the caller's shell.
        let command =
            Cli::command().mut_arg("workflow_node", |arg| arg.env(None::<&'static str>));
        let parsed = command.try_get_matches_from([
            "provenance",
            "--workflow-file",
            "demo.vt",
            "version",
            "demo.vt",
        ]);
        let err = parsed.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_identity_flags_override_environment() {
        let args = IdentityArgs {
            user: Some("bob".to_string()),
            project: Some("x77".to_string()),
        };
        assert_eq!(args.resolve(), Identity::new("bob", "x77"));
    }

    #[test]
    fn test_identity_falls_back_to_environment() {
        let args = IdentityArgs {
            user: None,
            project: Some("x77".to_string()),
        };
        let identity = args.resolve();
        assert_eq!(identity.user, Identity::from_env().user);
        assert_eq!(identity.project, "x77");
    }

    #[test]
    fn test_missing_workflow_is_no_session() {
        let args = WorkflowArgs {
            workflow_file: None,
            workflow_node: None,
        };
        let err = args.session().name().unwrap_err();
        assert!(err.to_string().contains("--workflow-file"));
    }

    #[test]
    fn test_cmd_build_writes_text_report() {
        let repo = make_repo();
        let builder = MetadataBuilder::new(
            Identity::new("alice", "p00"),
            StaticDocument::new(path_str(&repo, "demo.vt"), 42),
        );
        let out = repo.path().join("report.txt");

        cmd_build(
            &builder,
            vec![path_str(&repo, "tool.sh"), "infile.txt".to_string()],
            false,
            Some(&out),
        )
        .unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains("vt file node: 42 vt file version: Git info: "));
        assert_eq!(
            lines[3],
            format!("full command line: {} infile.txt", path_str(&repo, "tool.sh"))
        );
    }

    #[test]
    fn test_cmd_build_json_report() {
        let repo = make_repo();
        let builder = MetadataBuilder::new(
            Identity::new("alice", "p00"),
            StaticDocument::new(path_str(&repo, "demo.vt"), 42),
        );
        let out = repo.path().join("report.json");

        cmd_build(&builder, vec![path_str(&repo, "tool.sh")], true, Some(&out)).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(json["identity"]["project"], "p00");
        assert_eq!(json["created"].as_str().map(str::is_empty), Some(false));
    }

    #[test]
    fn test_cmd_build_missing_script_fails() {
        let repo = make_repo();
        let builder = MetadataBuilder::new(
            Identity::new("alice", "p00"),
            StaticDocument::new(path_str(&repo, "demo.vt"), 42),
        );
        let result = cmd_build(&builder, vec![path_str(&repo, "absent.sh")], false, None);
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_cmd_run_propagates_exit_code() {
        let repo = make_repo();
        let builder = MetadataBuilder::new(
            Identity::new("alice", "p00"),
            StaticDocument::new(path_str(&repo, "demo.vt"), 42),
        );
        let report = repo.path().join("run.txt");

        let code = cmd_run(
            &builder,
            vec!["/bin/sh".to_string(), path_str(&repo, "tool.sh")],
            Some(&report),
        )
        .unwrap();

        assert_eq!(code, ExitCode::from(3));
        let text = std::fs::read_to_string(&report).unwrap();
        assert!(text.contains("script executed: /bin/sh script file version: "));
        let last_line = format!("full command line: /bin/sh {}\n", path_str(&repo, "tool.sh"));
        assert!(text.ends_with(&last_line));
    }

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(exit_code(Some(0)), ExitCode::SUCCESS);
        assert_eq!(exit_code(Some(2)), ExitCode::from(2));
        assert_eq!(exit_code(None), ExitCode::FAILURE);
        assert_eq!(exit_code(Some(-1)), ExitCode::FAILURE);
    }
}
