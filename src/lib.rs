//! Skillsync: skill directory synchronization for agent projects.
//!
//! Distributes named skill directories from a central repository into
//! per-agent locations inside a project, and detects when a deployed copy has
//! diverged from its source.

pub mod agent;
pub mod cli;
pub mod config;
pub mod drift;
pub mod error;
pub mod logging;
pub mod report;
pub mod repository;
pub mod resolve;
pub mod tree;
