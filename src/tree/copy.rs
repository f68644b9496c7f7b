//! Faithful directory tree copy with replace semantics.
//!
//! The destination is removed wholesale and rebuilt from the source: files are
//! copied byte-for-byte with their permission modes, directories are recreated
//! with their modes, and symlinks are recreated with the identical unresolved
//! target string. The walk aborts on the first I/O failure, which can leave
//! the destination partially written; callers must treat a copy as a
//! destructive replace, never a merge.

use crate::error::SyncError;
use crate::tree::walk_failure;
use std::fs;
use std::io;
use std::os::unix::fs::symlink;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Replace `dst` with an exact copy of the directory tree at `src`.
///
/// `src` must exist and be a directory. Any prior contents of `dst` are
/// discarded before the copy starts.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<(), SyncError> {
    let src_meta = fs::metadata(src).map_err(|e| SyncError::io(src, e))?;
    if !src_meta.is_dir() {
        return Err(SyncError::NotADirectory(src.to_path_buf()));
    }
    debug!(src = %src.display(), dst = %dst.display(), "copying tree");

    remove_existing(dst)?;
    fs::create_dir_all(dst).map_err(|e| SyncError::copy(dst, e))?;
    fs::set_permissions(dst, src_meta.permissions()).map_err(|e| SyncError::copy(dst, e))?;

    // Default walk order visits parents before their children, so every
    // directory exists before anything is written beneath it.
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|e| {
            let (path, io_err) = walk_failure(src, e);
            SyncError::copy(path, io_err)
        })?;
        if entry.path() == src {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(src)
            .expect("walk entries are rooted at src");
        let target = dst.join(rel);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            let meta = entry
                .metadata()
                .map_err(|e| {
                    let (path, io_err) = walk_failure(src, e);
                    SyncError::copy(path, io_err)
                })?;
            fs::create_dir_all(&target).map_err(|e| SyncError::copy(&target, e))?;
            fs::set_permissions(&target, meta.permissions())
                .map_err(|e| SyncError::copy(&target, e))?;
        } else if file_type.is_symlink() {
            // The link target string is carried over unresolved; the link is
            // never followed.
            let link = fs::read_link(entry.path())
                .map_err(|e| SyncError::copy(entry.path(), e))?;
            symlink(&link, &target).map_err(|e| SyncError::copy(&target, e))?;
        } else {
            let meta = entry
                .metadata()
                .map_err(|e| {
                    let (path, io_err) = walk_failure(src, e);
                    SyncError::copy(path, io_err)
                })?;
            copy_file(entry.path(), &target, meta.permissions())
                .map_err(|e| SyncError::copy(entry.path(), e))?;
        }
    }
    Ok(())
}

/// Remove whatever currently occupies `dst`, directory tree or single entry.
fn remove_existing(dst: &Path) -> Result<(), SyncError> {
    match fs::symlink_metadata(dst) {
        Ok(meta) if meta.is_dir() => {
            fs::remove_dir_all(dst).map_err(|e| SyncError::copy(dst, e))
        }
        Ok(_) => fs::remove_file(dst).map_err(|e| SyncError::copy(dst, e)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(SyncError::copy(dst, e)),
    }
}

fn copy_file(src: &Path, dst: &Path, permissions: fs::Permissions) -> io::Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut reader = fs::File::open(src)?;
    let mut writer = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(dst)?;
    io::copy(&mut reader, &mut writer)?;
    fs::set_permissions(dst, permissions)?;
    Ok(())
}
