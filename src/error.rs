//! Error types for skill synchronization.
//!
//! Inequality between trees and a missing destination are ordinary results, not
//! errors. Errors are reserved for configuration problems, failed lookups, and
//! I/O failures, each carrying enough context to name the offending path.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by configuration loading, path resolution, and the tree engine.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Agent identifier is not in the catalog. Checked before any override
    /// lookup or filesystem access.
    #[error("unsupported agent {0:?}")]
    UnsupportedAgent(String),

    /// Skill directory is absent from the central repository.
    #[error("skill {0:?} not found in repository")]
    SkillNotFound(String),

    /// Skill is not registered in the project config.
    #[error("skill {0:?} is not registered in .skills.yaml")]
    SkillNotRegistered(String),

    /// Global config names an empty repository path.
    #[error("global config skillRepository is empty")]
    EmptyRepository,

    /// Project config declares no agents.
    #[error("project config agents list is empty")]
    EmptyAgents,

    /// Configuration file could not be read or written.
    #[error("config file {}: {source}", .path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration file is not valid YAML for its schema.
    #[error("parse config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoConfigDir,

    /// Copier or comparator source is not a directory.
    #[error("source {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// The copier hit an I/O failure. The destination may be left partially
    /// written; callers must treat copy as a destructive replace.
    #[error("copy failed at {}: {source}", .path.display())]
    CopyFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// I/O failure during comparison, mtime collection, or repository listing.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `init` refuses to overwrite an existing project config.
    #[error(".skills.yaml already exists")]
    AlreadyInitialized,

    /// Interactive prompt failed or was aborted.
    #[error("prompt failed: {0}")]
    Prompt(String),
}

impl SyncError {
    /// Attach a path to a raw I/O error from a walk or read.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SyncError::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach a path to a copier I/O error.
    pub fn copy(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SyncError::CopyFailed {
            path: path.into(),
            source,
        }
    }
}
