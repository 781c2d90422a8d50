//! Reconciliation of SteamCMD output into the game's mods directory.
//!
//! SteamCMD leaves every item under
//! `<content>/<identifier>/mods/<payload>/`. The reconciler flattens that
//! into `<destination>/<payload>/`. Items that failed to download have no
//! directory and are therefore absent from the walk.
//!
//! Unlike the batch invoker, reconciliation does not isolate failures: a
//! missing directory or a failed copy aborts the remaining work.

mod copy;

pub use copy::copy_dir_all;

use crate::error::{Error, Result};
use crate::list::Identifier;

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A payload copied into the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installed {
    /// Workshop item the payload came from.
    pub identifier: Identifier,
    /// Directory name of the payload.
    pub name: String,
    /// Where the payload now lives.
    pub path: PathBuf,
}

/// Copies every payload under `content_dir` into `destination`.
#[derive(Debug, Clone)]
pub struct Reconciler {
    content_dir: PathBuf,
    destination: PathBuf,
}

impl Reconciler {
    pub fn new(content_dir: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            destination: destination.into(),
        }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Walk the content directory and copy each payload, in name order.
    pub fn run(&self) -> Result<Vec<Installed>> {
        let items = subdirectories(&self.content_dir)?;
        debug!("Found {} workshop items in {:?}", items.len(), self.content_dir);

        fs::create_dir_all(&self.destination).map_err(|source| Error::Copy {
            from: self.content_dir.clone(),
            to: self.destination.clone(),
            source,
        })?;

        let mut installed = Vec::new();
        for item in items {
            let identifier = Identifier::new(file_name(&item));
            let payloads = subdirectories(&item.join("mods"))?;

            for payload in payloads {
                let name = file_name(&payload);
                let target = self.destination.join(&name);
                info!("Installing {} from workshop item {}", name, identifier);
                copy_dir_all(&payload, &target)?;
                installed.push(Installed {
                    identifier: identifier.clone(),
                    name,
                    path: target,
                });
            }
        }

        Ok(installed)
    }
}

/// Immediate subdirectories of `dir`, sorted by path.
fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>> {
    let enumerate_error = |source| Error::Enumerate {
        path: dir.to_path_buf(),
        source,
    };

    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir).map_err(enumerate_error)? {
        let entry = entry.map_err(enumerate_error)?;
        if entry.file_type().map_err(enumerate_error)?.is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
