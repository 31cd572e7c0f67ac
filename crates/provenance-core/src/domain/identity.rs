//! Identity of whoever produced an output: user name and compute project.

use serde::{Deserialize, Serialize};

/// Environment variable holding the user name.
pub const USER_ENV: &str = "USER";

/// Environment variable holding the compute project code.
pub const PROJECT_ENV: &str = "PROJECT";

/// Pre-resolved identity strings, embedded verbatim in reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user: String,
    pub project: String,
}

impl Identity {
    pub fn new(user: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            project: project.into(),
        }
    }

    /// Read `USER` and `PROJECT`; unset variables become empty strings.
    pub fn from_env() -> Self {
        Self {
            user: std::env::var(USER_ENV).unwrap_or_default(),
            project: std::env::var(PROJECT_ENV).unwrap_or_default(),
        }
    }
}
