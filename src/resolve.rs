//! Resolve the filesystem target for a (skill, agent) pair.
//!
//! Targets are never persisted; every operation recomputes them from the
//! project root, the skill name, the agent catalog, and the per-skill override
//! mapping. This keeps configuration and filesystem state decoupled.

use crate::agent::AgentCatalog;
use crate::error::SyncError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Per-skill override mapping: agent identifier to a project-relative path.
pub type Overrides = BTreeMap<String, String>;

/// Compute the install location for `skill_name` under `agent`.
///
/// A non-empty entry in `overrides` replaces the agent's default directory;
/// otherwise the target is `<project_root>/<default dir>/<skill_name>`. The
/// agent must be in the catalog even when an override is present.
pub fn resolve_skill_target(
    project_root: &Path,
    skill_name: &str,
    agent: &str,
    overrides: Option<&Overrides>,
    catalog: &AgentCatalog,
) -> Result<PathBuf, SyncError> {
    if !catalog.is_supported(agent) {
        return Err(SyncError::UnsupportedAgent(agent.to_string()));
    }
    if let Some(overrides) = overrides {
        if let Some(override_path) = overrides.get(agent) {
            if !override_path.is_empty() {
                // Overrides are project-relative; a leading slash must not
                // escape the project root.
                return Ok(project_root.join(override_path.trim_start_matches('/')));
            }
        }
    }
    let base = catalog.default_dir(agent)?;
    Ok(project_root.join(base).join(skill_name))
}
