//! ZIP archive extraction.
//!
//! Entries are visited in central-directory order. Nothing assumes that a
//! directory entry precedes the files inside it.

use super::{create_dir, enclosed_path, set_mode, PendingModes};
use crate::error::{Error, Result};

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

fn corrupt(archive: &Path, err: ZipError) -> Error {
    Error::Archive {
        path: archive.to_path_buf(),
        message: "corrupt zip archive".into(),
        source: Some(Box::new(err)),
    }
}

/// Extract the zip file at `archive` into `destination`.
pub fn extract(archive: &Path, destination: &Path) -> Result<()> {
    let file = File::open(archive).map_err(|e| Error::io(archive, e))?;
    let mut zip = ZipArchive::new(BufReader::new(file)).map_err(|e| corrupt(archive, e))?;
    let mut dir_modes = PendingModes::default();

    debug!("Extracting {} zip entries from {:?}", zip.len(), archive);
    for index in 0..zip.len() {
        let mut entry = zip.by_index(index).map_err(|e| corrupt(archive, e))?;
        let relative = enclosed_path(Path::new(entry.name())).ok_or_else(|| {
            Error::archive(archive, format!("entry {:?} escapes the destination", entry.name()))
        })?;
        let target = destination.join(relative);
        let mode = entry.unix_mode();

        if entry.is_dir() {
            create_dir(&target)?;
            dir_modes.push(target, mode);
            continue;
        }

        if let Some(parent) = target.parent() {
            create_dir(parent)?;
        }
        let mut out = File::create(&target).map_err(|e| Error::io(&target, e))?;
        io::copy(&mut entry, &mut out).map_err(|e| Error::io(&target, e))?;
        set_mode(&target, mode)?;
    }

    dir_modes.apply()
}
