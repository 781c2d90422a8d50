//! Per-identifier outcome of a batch run.
//!
//! ```rust
//! use zomboid_workshop::batch::{Status, Summary};
//! use zomboid_workshop::Identifier;
//!
//! let status = Status::Fail("steamcmd exited with 8".into());
//! let summary = Summary::new(Identifier::from("2169435993"), status);
//! assert!(!summary.is_success());
//! assert!(matches!(summary.status(), Status::Fail(_)));
//! ```

use crate::list::Identifier;

/// Invocation status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// SteamCMD exited successfully.
    Success,
    /// SteamCMD could not be spawned or exited with an error.
    Fail(String),
}

/// Represents an invocation [`Summary`] for one identifier.
#[derive(Debug, Clone)]
pub struct Summary {
    identifier: Identifier,
    status: Status,
    /// Stdout of the SteamCMD run followed by its stderr.
    output: String,
}

impl Summary {
    pub fn new(identifier: Identifier, status: Status) -> Self {
        Self {
            identifier,
            status,
            output: String::new(),
        }
    }

    /// Attach the captured tool output.
    pub fn with_output(self, output: String) -> Self {
        Self { output, ..self }
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}
