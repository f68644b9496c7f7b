//! Latest modification time across a tree.

use crate::error::SyncError;
use crate::tree::walk_failure;
use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;
use walkdir::WalkDir;

/// Latest modification time found at `path` or anywhere beneath it.
///
/// Returns `None` for a missing path; a file yields its own mtime; a directory
/// yields the maximum over the root entry and every entry below it. Symlink
/// entries contribute their own (link) mtime, not their target's.
pub fn latest_mod_time(path: &Path) -> Result<Option<SystemTime>, SyncError> {
    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(SyncError::io(path, e)),
    };
    let mut latest = meta.modified().map_err(|e| SyncError::io(path, e))?;
    if !meta.is_dir() {
        return Ok(Some(latest));
    }

    for entry in WalkDir::new(path) {
        let entry = entry.map_err(|e| {
            let (offending, io_err) = walk_failure(path, e);
            SyncError::io(offending, io_err)
        })?;
        let entry_meta = entry.metadata().map_err(|e| {
            let (offending, io_err) = walk_failure(path, e);
            SyncError::io(offending, io_err)
        })?;
        let modified = entry_meta
            .modified()
            .map_err(|e| SyncError::io(entry.path(), e))?;
        if modified > latest {
            latest = modified;
        }
    }
    Ok(Some(latest))
}
