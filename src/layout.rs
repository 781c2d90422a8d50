//! On-disk layout of the install root.
//!
//! ```text
//! <root>/steamcmd/                                             bootstrapped tool
//! <root>/mods/steamapps/workshop/content/108600/<id>/mods/<payload>/   tool output
//! <home>/Zomboid/mods/<payload>/                               destination
//! ```

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Steam application id of Project Zomboid.
pub const APP_ID: &str = "108600";

/// Directory name of the bootstrapped tool under the root.
pub const TOOL_DIR: &str = "steamcmd";

/// Directory passed to `+force_install_dir`.
pub const MODS_DIR: &str = "mods";

/// Paths derived from the install root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Layout rooted at the directory holding the running executable.
    pub fn from_current_exe() -> Result<Self> {
        let exe = std::env::current_exe()
            .map_err(|e| Error::Environment(format!("cannot locate the running program: {e}")))?;
        let root = exe.parent().ok_or_else(|| {
            Error::Environment(format!("{} has no parent directory", exe.display()))
        })?;
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where SteamCMD lives.
    pub fn tool_dir(&self) -> PathBuf {
        self.root.join(TOOL_DIR)
    }

    /// Install directory handed to SteamCMD.
    pub fn mods_dir(&self) -> PathBuf {
        self.root.join(MODS_DIR)
    }

    /// Directory holding one subdirectory per downloaded workshop item.
    pub fn content_dir(&self) -> PathBuf {
        self.mods_dir()
            .join("steamapps")
            .join("workshop")
            .join("content")
            .join(APP_ID)
    }
}

/// Default reconciliation target: `<home>/Zomboid/mods`.
pub fn default_destination() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join("Zomboid").join("mods"))
        .ok_or_else(|| Error::Environment("cannot determine the user's home directory".into()))
}
