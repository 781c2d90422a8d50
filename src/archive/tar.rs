//! Gzip-compressed tar extraction.
//!
//! The stream is read entry by entry until the end-of-archive marker.

use super::{create_dir, enclosed_path, set_mode, PendingModes};
use crate::error::{Error, Result};

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use tar::Archive;
use tracing::debug;

fn corrupt(archive: &Path, err: io::Error) -> Error {
    Error::Archive {
        path: archive.to_path_buf(),
        message: "corrupt tar.gz archive".into(),
        source: Some(Box::new(err)),
    }
}

/// Extract the tar.gz file at `archive` into `destination`.
pub fn extract(archive: &Path, destination: &Path) -> Result<()> {
    let file = File::open(archive).map_err(|e| Error::io(archive, e))?;
    let mut tar = Archive::new(GzDecoder::new(BufReader::new(file)));
    let mut dir_modes = PendingModes::default();

    for entry in tar.entries().map_err(|e| corrupt(archive, e))? {
        let mut entry = entry.map_err(|e| corrupt(archive, e))?;
        let path = entry.path().map_err(|e| corrupt(archive, e))?.into_owned();
        let relative = enclosed_path(&path).ok_or_else(|| {
            Error::archive(archive, format!("entry {path:?} escapes the destination"))
        })?;
        let target = destination.join(relative);
        let header = entry.header();
        let mode = header.mode().ok();
        let entry_type = header.entry_type();

        if entry_type.is_dir() {
            create_dir(&target)?;
            dir_modes.push(target, mode);
        } else if entry_type.is_file() {
            if let Some(parent) = target.parent() {
                create_dir(parent)?;
            }
            let mut out = File::create(&target).map_err(|e| Error::io(&target, e))?;
            io::copy(&mut entry, &mut out).map_err(|e| corrupt(archive, e))?;
            set_mode(&target, mode)?;
        } else {
            debug!("Skipping {:?} entry {:?}", entry_type, path);
        }
    }

    dir_modes.apply()
}
