//! Configuration loading and persistence.
//!
//! Two YAML documents drive the tool: a global config naming the central skill
//! repository, stored in the platform config directory, and a per-project
//! `.skills.yaml` at the project root declaring the agents in use and the
//! registered skills with their per-agent path overrides.
//!
//! The global config location can be overridden through the
//! `SKILLSYNC_GLOBAL_CONFIG` environment variable, and callers may pass an
//! explicit path; both exist so tests never touch the real home directory.

use crate::error::SyncError;
use crate::resolve::Overrides;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Project config file name, relative to the project root.
pub const PROJECT_CONFIG_NAME: &str = ".skills.yaml";

/// Environment variable overriding the global config path.
pub const GLOBAL_CONFIG_ENV: &str = "SKILLSYNC_GLOBAL_CONFIG";

/// Global configuration: where the central skill repository lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalConfig {
    pub skill_repository: String,
}

/// Per-project configuration: declared agents and registered skills.
///
/// `skill_map` maps skill name to that skill's per-agent path overrides; an
/// empty override map means every agent uses its default location. `BTreeMap`
/// keeps serialization and iteration order deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub agents: Vec<String>,
    #[serde(default)]
    pub skill_map: BTreeMap<String, Overrides>,
}

/// Resolve the global config path: explicit override, environment variable,
/// then the platform config directory.
pub fn global_config_path(explicit: Option<&Path>) -> Result<PathBuf, SyncError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = std::env::var(GLOBAL_CONFIG_ENV) {
        if !env_path.is_empty() {
            return Ok(PathBuf::from(env_path));
        }
    }
    let dirs = directories::ProjectDirs::from("", "skillsync", "skillsync")
        .ok_or(SyncError::NoConfigDir)?;
    Ok(dirs.config_dir().join("config.yaml"))
}

/// Load and validate the global config.
pub fn load_global_config(path: &Path) -> Result<GlobalConfig, SyncError> {
    let data = fs::read_to_string(path).map_err(|e| SyncError::ConfigIo {
        path: path.to_path_buf(),
        source: e,
    })?;
    let cfg: GlobalConfig = serde_yaml::from_str(&data).map_err(|e| SyncError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })?;
    if cfg.skill_repository.is_empty() {
        return Err(SyncError::EmptyRepository);
    }
    Ok(cfg)
}

/// Persist the global config, creating parent directories as needed.
pub fn write_global_config(path: &Path, cfg: &GlobalConfig) -> Result<(), SyncError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| SyncError::ConfigIo {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    let data = serde_yaml::to_string(cfg).map_err(|e| SyncError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })?;
    fs::write(path, data).map_err(|e| SyncError::ConfigIo {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Whether the global config file exists.
pub fn global_config_exists(path: &Path) -> Result<bool, SyncError> {
    exists(path)
}

/// Load and validate the project config from `<project_root>/.skills.yaml`.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig, SyncError> {
    let path = project_root.join(PROJECT_CONFIG_NAME);
    let data = fs::read_to_string(&path).map_err(|e| SyncError::ConfigIo {
        path: path.clone(),
        source: e,
    })?;
    let cfg: ProjectConfig = serde_yaml::from_str(&data).map_err(|e| SyncError::ConfigParse {
        path: path.clone(),
        source: e,
    })?;
    if cfg.agents.is_empty() {
        return Err(SyncError::EmptyAgents);
    }
    Ok(cfg)
}

/// Persist the project config at `<project_root>/.skills.yaml`.
pub fn write_project_config(project_root: &Path, cfg: &ProjectConfig) -> Result<(), SyncError> {
    let path = project_root.join(PROJECT_CONFIG_NAME);
    let data = serde_yaml::to_string(cfg).map_err(|e| SyncError::ConfigParse {
        path: path.clone(),
        source: e,
    })?;
    fs::write(&path, data).map_err(|e| SyncError::ConfigIo { path, source: e })
}

/// Whether the project config file exists.
pub fn project_config_exists(project_root: &Path) -> Result<bool, SyncError> {
    exists(&project_root.join(PROJECT_CONFIG_NAME))
}

fn exists(path: &Path) -> Result<bool, SyncError> {
    match fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(SyncError::ConfigIo {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
