//! Agent catalog: the closed set of supported agents and their default
//! install directories.
//!
//! The catalog is an immutable value passed explicitly into path resolution and
//! config validation rather than process-wide static data, so the agent set can
//! be swapped out in tests without touching ambient state.

use crate::error::SyncError;
use std::collections::BTreeMap;

/// Immutable mapping from agent identifier to its default skill directory,
/// relative to the project root.
#[derive(Debug, Clone)]
pub struct AgentCatalog {
    entries: BTreeMap<String, String>,
}

impl AgentCatalog {
    /// Build a catalog from (agent, default relative directory) pairs.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        AgentCatalog {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// The built-in agent set shipped with skillsync.
    pub fn builtin() -> Self {
        AgentCatalog::new([
            ("codex", ".codex/skills"),
            ("kilo-code", ".kilocode/skills"),
        ])
    }

    /// Whether `agent` is a member of the catalog.
    pub fn is_supported(&self, agent: &str) -> bool {
        self.entries.contains_key(agent)
    }

    /// Default skill directory for `agent`, relative to the project root.
    pub fn default_dir(&self, agent: &str) -> Result<&str, SyncError> {
        self.entries
            .get(agent)
            .map(String::as_str)
            .ok_or_else(|| SyncError::UnsupportedAgent(agent.to_string()))
    }

    /// Agent identifiers in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Reject any agent list containing an identifier outside the catalog.
    ///
    /// Runs at config-validation time, before any filesystem operation.
    pub fn ensure_supported<S: AsRef<str>>(&self, agents: &[S]) -> Result<(), SyncError> {
        for agent in agents {
            if !self.is_supported(agent.as_ref()) {
                return Err(SyncError::UnsupportedAgent(agent.as_ref().to_string()));
            }
        }
        Ok(())
    }
}
