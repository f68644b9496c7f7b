//! Drift detection: which registered skills have diverged from their
//! repository source, and in which direction.
//!
//! The drift determinant is structural/content inequality as judged by the
//! tree comparator. Timestamps only label the direction of divergence; they
//! never decide whether a skill is reported.

use crate::agent::AgentCatalog;
use crate::config::ProjectConfig;
use crate::error::SyncError;
use crate::repository::skill_source;
use crate::resolve::resolve_skill_target;
use crate::tree::{latest_mod_time, trees_equal};
use std::fmt;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Direction of divergence, derived from modification times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftStatus {
    /// No deployed copy found for any agent while the repository copy exists.
    ProjectMissing,
    /// Repository copy was modified after every deployed copy.
    RepoNewer,
    /// Some deployed copy was modified after the repository copy.
    ProjectNewer,
    /// Timestamps tie even though content differs.
    InSync,
}

impl fmt::Display for DriftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DriftStatus::ProjectMissing => "project missing",
            DriftStatus::RepoNewer => "repo newer",
            DriftStatus::ProjectNewer => "project newer",
            DriftStatus::InSync => "in sync",
        };
        f.write_str(label)
    }
}

/// One drifted skill: repository and project mtimes plus the derived status.
///
/// Recomputed on every audit, never persisted. `None` times mean the path was
/// absent.
#[derive(Debug, Clone)]
pub struct DriftRecord {
    pub skill: String,
    pub repo_time: Option<SystemTime>,
    pub project_time: Option<SystemTime>,
    pub status: DriftStatus,
}

/// Derive the status label from the two mtimes. Mutually exclusive cases,
/// evaluated in order; a missing time compares as the zero time.
pub fn classify(repo_time: Option<SystemTime>, project_time: Option<SystemTime>) -> DriftStatus {
    if project_time.is_none() && repo_time.is_some() {
        return DriftStatus::ProjectMissing;
    }
    let repo = repo_time.unwrap_or(UNIX_EPOCH);
    let project = project_time.unwrap_or(UNIX_EPOCH);
    if repo > project {
        DriftStatus::RepoNewer
    } else if project > repo {
        DriftStatus::ProjectNewer
    } else {
        DriftStatus::InSync
    }
}

/// Audit every registered skill against its deployed copies.
///
/// Returns records for drifted skills only, in skill-name order. A skill is
/// drifted when any declared agent's copy is unequal to the repository source.
/// A skill missing from the repository aborts the whole audit.
pub fn audit_project(
    repo_root: &Path,
    project_root: &Path,
    project_cfg: &ProjectConfig,
    catalog: &AgentCatalog,
) -> Result<Vec<DriftRecord>, SyncError> {
    catalog.ensure_supported(&project_cfg.agents)?;

    let mut drifted = Vec::new();
    for (skill, overrides) in &project_cfg.skill_map {
        let src = skill_source(repo_root, skill)?;
        let repo_time = latest_mod_time(&src)?;

        let mut project_time: Option<SystemTime> = None;
        let mut has_drift = false;
        for agent in &project_cfg.agents {
            let target =
                resolve_skill_target(project_root, skill, agent, Some(overrides), catalog)?;
            if let Some(target_time) = latest_mod_time(&target)? {
                if project_time.map_or(true, |current| target_time > current) {
                    project_time = Some(target_time);
                }
            }
            if !trees_equal(&src, &target)? {
                debug!(skill = %skill, agent = %agent, target = %target.display(), "copy differs from source");
                has_drift = true;
            }
        }

        if has_drift {
            drifted.push(DriftRecord {
                skill: skill.clone(),
                repo_time,
                project_time,
                status: classify(repo_time, project_time),
            });
        }
    }
    Ok(drifted)
}
