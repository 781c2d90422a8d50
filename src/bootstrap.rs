//! Acquisition of SteamCMD.
//!
//! The archive is fetched and extracted on every run. There is no freshness
//! check; an existing tool directory is simply overwritten in place.

use crate::archive::{self, ArchiveKind};
use crate::download::{Download, Fetcher};
use crate::error::{Error, Result};

use reqwest::Url;
use std::path::Path;
use tracing::{debug, info};

/// How SteamCMD ends up in the tool directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bootstrap {
    /// Download `url` into the tool directory and extract it there.
    Archive { url: Url, kind: ArchiveKind },
    /// The tool is already installed on the system. Does nothing.
    Preinstalled,
}

impl Bootstrap {
    /// Ensure SteamCMD is available under `tool_dir`.
    pub async fn run(&self, fetcher: &Fetcher, tool_dir: &Path) -> Result<()> {
        match self {
            Bootstrap::Archive { url, kind } => {
                let download = Download::try_from(url)?;
                let archive_path = tool_dir.join(&download.filename);

                std::fs::create_dir_all(tool_dir).map_err(|e| Error::io(tool_dir, e))?;

                info!("Downloading SteamCMD from {}", url);
                let size = fetcher.fetch(&download, &archive_path).await?;
                debug!("Saved {} bytes to {:?}", size, archive_path);

                info!("Extracting {:?} into {:?}", archive_path, tool_dir);
                archive::extract(*kind, &archive_path, tool_dir)
            }
            Bootstrap::Preinstalled => {
                debug!("SteamCMD is expected to be preinstalled, skipping bootstrap");
                Ok(())
            }
        }
    }
}
