//! Error handling for the workshop pipeline.
//!
//! Every fallible operation in the crate returns [`Error`]. Lower layers hand
//! their errors back unchanged; only the pipeline and the binary decide whether
//! a failure aborts the run or is logged and skipped. Each variant belongs to
//! one failure class, and [`Error::exit_code`] maps the class to the process
//! exit code.

use reqwest::StatusCode;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors that can happen while bootstrapping SteamCMD or installing mods.
#[derive(Error, Debug)]
pub enum Error {
    /// The program directory or the user's home directory could not be
    /// determined.
    #[error("Environment error: {0}")]
    Environment(String),

    /// The host operating system has no [`PlatformProfile`](crate::PlatformProfile).
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// Error from the underlying URL parser or the expected URL format.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The request never produced a complete response.
    ///
    /// Covers connection failures as well as errors while streaming the body.
    #[error("network failure while fetching {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest_middleware::Error,
    },

    /// Error from the Reqwest library while building the HTTP client.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// The proxy given on the command line or in the environment is not a valid URL.
    #[error("invalid proxy {proxy}")]
    InvalidProxy {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status code.
    #[error("remote rejected request for {url}: {status}")]
    Status { url: String, status: StatusCode },

    /// The archive could not be decoded.
    #[error("failed to extract {}: {message}", .path.display())]
    Archive {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A filesystem operation failed on the given path.
    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// SteamCMD could not be started for an identifier.
    #[error("failed to launch steamcmd for {identifier}")]
    Spawn {
        identifier: String,
        #[source]
        source: io::Error,
    },

    /// SteamCMD ran but exited unsuccessfully for an identifier.
    #[error("steamcmd exited with {status} for {identifier}")]
    ToolExit {
        identifier: String,
        status: ExitStatus,
        output: String,
    },

    /// A directory the reconciler expected to list is missing or unreadable.
    #[error("failed to read directory {}", .path.display())]
    Enumerate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Copying a payload into the destination failed part way.
    #[error("failed to copy {} to {}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The identifier list could not be read.
    #[error("failed to read list {}", .path.display())]
    List {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No identifier list was found next to the program.
    #[error("no *.txt list files found in {}", .0.display())]
    NoListFiles(PathBuf),

    /// Error from the interactive prompt.
    #[error("Prompt failed")]
    Prompt {
        #[from]
        source: inquire::InquireError,
    },
}

impl Error {
    /// Process exit code for the failure class this error belongs to.
    ///
    /// | code | class |
    /// |------|-------|
    /// | 2 | environment |
    /// | 3 | transfer |
    /// | 4 | extraction |
    /// | 5 | reconciliation |
    /// | 6 | input |
    /// | 1 | anything else |
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Environment(_) | Error::UnsupportedPlatform(_) => 2,
            Error::InvalidUrl(_)
            | Error::Reqwest { .. }
            | Error::Transport { .. }
            | Error::Status { .. } => 3,
            Error::Archive { .. } | Error::Io { .. } => 4,
            Error::Enumerate { .. } | Error::Copy { .. } => 5,
            Error::List { .. }
            | Error::NoListFiles(_)
            | Error::Prompt { .. }
            | Error::InvalidProxy { .. } => 6,
            Error::Spawn { .. } | Error::ToolExit { .. } => 1,
        }
    }

    /// The error message followed by every underlying cause, `: `-separated.
    pub fn report(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn archive(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Archive {
            path: path.into(),
            message: message.into(),
            source: None,
        }
    }
}

/// Result type alias for operations that can fail with an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
