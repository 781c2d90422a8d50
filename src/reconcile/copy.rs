use crate::error::{Error, Result};

use std::fs;
use std::path::Path;
#[cfg(not(unix))]
use tracing::debug;

fn copy_error(from: &Path, to: &Path, source: std::io::Error) -> Error {
    Error::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    }
}

/// Recursively merge `src` into `dest`.
///
/// Missing directories are created, files at the same relative path are
/// overwritten and nothing already in `dest` is removed. Symlinks are
/// recreated as links, never followed. Stops at the first failure, leaving
/// whatever was copied so far.
pub fn copy_dir_all(src: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest).map_err(|e| copy_error(src, dest, e))?;

    for entry in fs::read_dir(src).map_err(|e| copy_error(src, dest, e))? {
        let entry = entry.map_err(|e| copy_error(src, dest, e))?;
        let src_path = entry.path();
        let dest_path = dest.join(entry.file_name());

        let file_type = entry
            .file_type()
            .map_err(|e| copy_error(&src_path, &dest_path, e))?;
        if file_type.is_symlink() {
            copy_symlink(&src_path, &dest_path)?;
        } else if file_type.is_dir() {
            copy_dir_all(&src_path, &dest_path)?;
        } else {
            fs::copy(&src_path, &dest_path).map_err(|e| copy_error(&src_path, &dest_path, e))?;
        }
    }
    Ok(())
}

/// Recreate the link at `src` as `dest`, replacing a file or link already there.
#[cfg(unix)]
fn copy_symlink(src: &Path, dest: &Path) -> Result<()> {
    let target = fs::read_link(src).map_err(|e| copy_error(src, dest, e))?;
    if let Ok(existing) = fs::symlink_metadata(dest) {
        if !existing.is_dir() {
            fs::remove_file(dest).map_err(|e| copy_error(src, dest, e))?;
        }
    }
    std::os::unix::fs::symlink(&target, dest).map_err(|e| copy_error(src, dest, e))
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, _dest: &Path) -> Result<()> {
    debug!("Skipping symlink {:?}", src);
    Ok(())
}
