//! Archive extraction functionality.
//!
//! This module materializes a downloaded archive into a directory tree. The
//! caller names the container kind; nothing is sniffed from the file content.
//!
//! # Examples
//!
//! ```rust,no_run
//! use zomboid_workshop::archive::{extract, ArchiveKind};
//! use std::path::Path;
//!
//! # fn example() -> zomboid_workshop::Result<()> {
//! extract(
//!     ArchiveKind::TarGz,
//!     Path::new("steamcmd/steamcmd_linux.tar.gz"),
//!     Path::new("steamcmd"),
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod tar;
pub mod zip;

use crate::error::{Error, Result};

use std::fs;
use std::path::{Component, Path, PathBuf};

/// Container format of a bootstrap archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    /// Directory-indexed zip container.
    Zip,
    /// Gzip-compressed tape archive.
    TarGz,
}

/// Extract `archive` into `destination`.
///
/// Parent directories are created as needed, files already present at the same
/// relative path are overwritten and unix permission bits are restored.
/// Partial output is left in place on failure.
pub fn extract(kind: ArchiveKind, archive: &Path, destination: &Path) -> Result<()> {
    fs::create_dir_all(destination).map_err(|e| Error::io(destination, e))?;
    match kind {
        ArchiveKind::Zip => zip::extract(archive, destination),
        ArchiveKind::TarGz => tar::extract(archive, destination),
    }
}

/// Normalize an entry path so it stays below the destination.
///
/// Returns `None` for absolute paths and for paths climbing out with `..`.
pub(crate) fn enclosed_path(path: &Path) -> Option<PathBuf> {
    let mut enclosed = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => enclosed.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(enclosed)
}

/// Creates `path` and any missing parents.
pub(crate) fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))
}

/// Applies the permission bits declared by an archive entry.
#[cfg(unix)]
pub(crate) fn set_mode(path: &Path, mode: Option<u32>) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let Some(mode) = mode else {
        return Ok(());
    };
    fs::set_permissions(path, fs::Permissions::from_mode(mode & 0o7777))
        .map_err(|e| Error::io(path, e))
}

#[cfg(not(unix))]
pub(crate) fn set_mode(_path: &Path, _mode: Option<u32>) -> Result<()> {
    Ok(())
}

/// Directory modes are applied once every entry is written, so that a
/// read-only directory does not block files extracted into it later.
#[derive(Debug, Default)]
pub(crate) struct PendingModes(Vec<(PathBuf, u32)>);

impl PendingModes {
    pub(crate) fn push(&mut self, path: PathBuf, mode: Option<u32>) {
        if let Some(mode) = mode {
            self.0.push((path, mode));
        }
    }

    pub(crate) fn apply(self) -> Result<()> {
        // Deepest first, so a parent never loses write access before its children.
        let mut modes = self.0;
        modes.sort_by(|(a, _), (b, _)| b.components().count().cmp(&a.components().count()));
        for (path, mode) in modes {
            set_mode(&path, Some(mode))?;
        }
        Ok(())
    }
}
