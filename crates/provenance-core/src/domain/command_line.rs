//! The command line being documented.

use serde::{Deserialize, Serialize};

use super::error::{ProvenanceError, Result};

/// Non-empty argv: element 0 is the script, the rest are its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct CommandLine(Vec<String>);

impl CommandLine {
    pub fn new<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        if args.is_empty() {
            return Err(ProvenanceError::EmptyCommandLine);
        }
        Ok(Self(args))
    }

    /// Script path as given, before environment expansion.
    pub fn script(&self) -> &str {
        &self.0[0]
    }

    pub fn args(&self) -> &[String] {
        &self.0[1..]
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl std::fmt::Display for CommandLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

impl TryFrom<Vec<String>> for CommandLine {
    type Error = ProvenanceError;

    fn try_from(args: Vec<String>) -> Result<Self> {
        Self::new(args)
    }
}

impl From<CommandLine> for Vec<String> {
    fn from(cmd: CommandLine) -> Self {
        cmd.0
    }
}
