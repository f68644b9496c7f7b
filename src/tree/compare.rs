//! Structural and byte-level tree equality.
//!
//! Equality is decided in two passes. The first walks the source: every entry
//! must have a counterpart at the same relative path under the destination
//! with matching kind, and for files matching permission bits and bytes, for
//! symlinks an identical unresolved target string. The second walks the
//! destination: any path with no counterpart under the source makes the trees
//! unequal. The first mismatch wins; differences are never enumerated.
//!
//! Inequality is an ordinary `Ok(false)` result. Errors are raised only for
//! I/O failures, or when the source itself is missing or not a directory.

use crate::error::SyncError;
use crate::tree::walk_failure;
use std::fs;
use std::io::{self, Read};
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Lockstep read size for file content comparison.
const CHUNK_SIZE: usize = 32 * 1024;

/// Permission bits compared for regular files, type bits excluded.
const MODE_MASK: u32 = 0o7777;

/// Whether the trees at `src` and `dst` are structurally and byte-for-byte
/// identical.
///
/// A missing or non-directory `dst` is "not equal", not a failure; a missing
/// or non-directory `src` is an error because the source is authoritative.
pub fn trees_equal(src: &Path, dst: &Path) -> Result<bool, SyncError> {
    let src_meta = fs::metadata(src).map_err(|e| SyncError::io(src, e))?;
    if !src_meta.is_dir() {
        return Err(SyncError::NotADirectory(src.to_path_buf()));
    }
    let dst_meta = match fs::metadata(dst) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(SyncError::io(dst, e)),
    };
    if !dst_meta.is_dir() {
        return Ok(false);
    }

    if !source_entries_match(src, dst)? {
        return Ok(false);
    }
    if !destination_has_no_extras(src, dst)? {
        return Ok(false);
    }
    Ok(true)
}

/// Pass 1: every source entry needs a matching counterpart under `dst`.
fn source_entries_match(src: &Path, dst: &Path) -> Result<bool, SyncError> {
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|e| {
            let (path, io_err) = walk_failure(src, e);
            SyncError::io(path, io_err)
        })?;
        if entry.path() == src {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(src)
            .expect("walk entries are rooted at src");
        let counterpart = dst.join(rel);

        // Link-aware status check; symlinks are never dereferenced here.
        let counterpart_meta = match fs::symlink_metadata(&counterpart) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %counterpart.display(), "missing counterpart");
                return Ok(false);
            }
            Err(e) => return Err(SyncError::io(counterpart, e)),
        };

        let file_type = entry.file_type();
        if file_type.is_symlink() {
            if !counterpart_meta.file_type().is_symlink() {
                return Ok(false);
            }
            let src_link = fs::read_link(entry.path())
                .map_err(|e| SyncError::io(entry.path(), e))?;
            let dst_link =
                fs::read_link(&counterpart).map_err(|e| SyncError::io(&counterpart, e))?;
            if src_link != dst_link {
                return Ok(false);
            }
        } else if file_type.is_dir() {
            // Contents are verified by recursion into this path during the
            // same walk; kind match suffices here.
            if !counterpart_meta.is_dir() {
                return Ok(false);
            }
        } else {
            let entry_meta = entry.metadata().map_err(|e| {
                let (path, io_err) = walk_failure(src, e);
                SyncError::io(path, io_err)
            })?;
            if !entry_meta.file_type().is_file() || !counterpart_meta.file_type().is_file() {
                return Ok(false);
            }
            if entry_meta.permissions().mode() & MODE_MASK
                != counterpart_meta.permissions().mode() & MODE_MASK
            {
                return Ok(false);
            }
            if !files_equal(entry.path(), &counterpart)? {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// Pass 2: every destination path must exist (by link-aware status check)
/// under `src`; extra entries make the trees unequal.
fn destination_has_no_extras(src: &Path, dst: &Path) -> Result<bool, SyncError> {
    for entry in WalkDir::new(dst) {
        let entry = entry.map_err(|e| {
            let (path, io_err) = walk_failure(dst, e);
            SyncError::io(path, io_err)
        })?;
        if entry.path() == dst {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(dst)
            .expect("walk entries are rooted at dst");
        match fs::symlink_metadata(src.join(rel)) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %entry.path().display(), "extra destination entry");
                return Ok(false);
            }
            Err(e) => return Err(SyncError::io(src.join(rel), e)),
        }
    }
    Ok(true)
}

/// Byte-for-byte file comparison in fixed-size lockstep chunks.
///
/// A size mismatch short-circuits before any content is read.
fn files_equal(a: &Path, b: &Path) -> Result<bool, SyncError> {
    let a_meta = fs::metadata(a).map_err(|e| SyncError::io(a, e))?;
    let b_meta = fs::metadata(b).map_err(|e| SyncError::io(b, e))?;
    if a_meta.len() != b_meta.len() {
        return Ok(false);
    }

    let mut file_a = fs::File::open(a).map_err(|e| SyncError::io(a, e))?;
    let mut file_b = fs::File::open(b).map_err(|e| SyncError::io(b, e))?;
    let mut buf_a = vec![0u8; CHUNK_SIZE];
    let mut buf_b = vec![0u8; CHUNK_SIZE];
    loop {
        let read_a = file_a.read(&mut buf_a).map_err(|e| SyncError::io(a, e))?;
        let read_b = file_b.read(&mut buf_b).map_err(|e| SyncError::io(b, e))?;
        if read_a != read_b {
            return Ok(false);
        }
        if read_a == 0 {
            return Ok(true);
        }
        if buf_a[..read_a] != buf_b[..read_b] {
            return Ok(false);
        }
    }
}
