//! Directory tree engine: copy, equality, and modification-time walks.
//!
//! All three operations run single-threaded over `walkdir` traversals and know
//! nothing about skills, agents, or configuration; they operate on paths the
//! caller has already resolved.

mod compare;
mod copy;
mod mtime;

pub use compare::trees_equal;
pub use copy::copy_tree;
pub use mtime::latest_mod_time;

use std::io;
use std::path::{Path, PathBuf};

/// Convert a `walkdir` error into (offending path, io error), falling back to
/// the walk root when the error carries no path.
pub(crate) fn walk_failure(root: &Path, err: walkdir::Error) -> (PathBuf, io::Error) {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());
    let io_err = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "filesystem loop detected"));
    (path, io_err)
}
