//! CLI definitions and command execution.
//!
//! Commands are executed through [`CliContext::execute`], which returns the
//! rendered output instead of printing it, so every command is exercisable
//! from integration tests without spawning a process.

use crate::agent::AgentCatalog;
use crate::config::{
    global_config_exists, global_config_path, load_global_config, load_project_config,
    project_config_exists, write_global_config, write_project_config, GlobalConfig,
    ProjectConfig, PROJECT_CONFIG_NAME,
};
use crate::drift::audit_project;
use crate::error::SyncError;
use crate::report::format_drift_report;
use crate::repository::{list_skills, skill_source};
use crate::resolve::resolve_skill_target;
use crate::tree::copy_tree;
use clap::{Parser, Subcommand};
use dialoguer::{Input, MultiSelect};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Skillsync CLI - skill directory synchronization for agent projects
#[derive(Parser)]
#[command(name = "skillsync")]
#[command(about = "Synchronize agent skill directories from a central repository into projects")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project root directory
    #[arg(long, default_value = ".")]
    pub project_root: PathBuf,

    /// Global configuration file path (overrides default location)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level directive (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a project for skill management
    Init {
        /// Central skill repository path (prompted for when omitted)
        #[arg(long)]
        repository: Option<PathBuf>,
        /// Agents used in this project (prompted for when omitted)
        #[arg(long, value_delimiter = ',')]
        agents: Vec<String>,
    },
    /// List available skills in the central repository
    List,
    /// Add a skill from the central repository
    Add {
        /// Skill name
        skill: String,
    },
    /// Remove a skill from the project
    Remove {
        /// Skill name
        skill: String,
    },
    /// Synchronize all registered skills
    Sync,
    /// List drifting skills for the current project
    Drift,
}

/// Execution context: project root, global config location, agent catalog.
pub struct CliContext {
    project_root: PathBuf,
    global_config: Option<PathBuf>,
    catalog: AgentCatalog,
}

impl CliContext {
    /// Create a context over `project_root` with the built-in agent catalog.
    pub fn new(project_root: PathBuf, global_config: Option<PathBuf>) -> Result<Self, SyncError> {
        Ok(CliContext {
            project_root,
            global_config,
            catalog: AgentCatalog::builtin(),
        })
    }

    /// Execute a command and return its rendered output.
    pub fn execute(&self, command: &Commands) -> Result<String, SyncError> {
        match command {
            Commands::Init { repository, agents } => {
                self.run_init(repository.as_deref(), agents)
            }
            Commands::List => self.run_list(),
            Commands::Add { skill } => self.run_add(skill),
            Commands::Remove { skill } => self.run_remove(skill),
            Commands::Sync => self.run_sync(),
            Commands::Drift => self.run_drift(),
        }
    }

    fn global_path(&self) -> Result<PathBuf, SyncError> {
        global_config_path(self.global_config.as_deref())
    }

    fn load_global(&self) -> Result<GlobalConfig, SyncError> {
        load_global_config(&self.global_path()?)
    }

    fn run_init(
        &self,
        repository: Option<&Path>,
        agents: &[String],
    ) -> Result<String, SyncError> {
        let mut out = String::new();
        let global_path = self.global_path()?;
        if !global_config_exists(&global_path)? {
            let repo = match repository {
                Some(path) => path.to_string_lossy().into_owned(),
                None => prompt_repository()?,
            };
            let meta =
                fs::metadata(&repo).map_err(|e| SyncError::io(PathBuf::from(&repo), e))?;
            if !meta.is_dir() {
                return Err(SyncError::NotADirectory(PathBuf::from(repo)));
            }
            write_global_config(
                &global_path,
                &GlobalConfig {
                    skill_repository: repo,
                },
            )?;
            out.push_str(&format!("Created {}\n", global_path.display()));
        }

        if project_config_exists(&self.project_root)? {
            return Err(SyncError::AlreadyInitialized);
        }
        let agents = if agents.is_empty() {
            prompt_agents(&self.catalog)?
        } else {
            agents.to_vec()
        };
        self.catalog.ensure_supported(&agents)?;
        write_project_config(
            &self.project_root,
            &ProjectConfig {
                agents,
                skill_map: BTreeMap::new(),
            },
        )?;
        out.push_str(&format!("Created {}", PROJECT_CONFIG_NAME));
        Ok(out)
    }

    fn run_list(&self) -> Result<String, SyncError> {
        let global = self.load_global()?;
        let skills = list_skills(Path::new(&global.skill_repository))?;
        if skills.is_empty() {
            return Ok(format!(
                "No skills found in {}",
                global.skill_repository
            ));
        }
        Ok(skills.join("\n"))
    }

    fn run_add(&self, skill: &str) -> Result<String, SyncError> {
        let global = self.load_global()?;
        let mut project = load_project_config(&self.project_root)?;
        self.catalog.ensure_supported(&project.agents)?;

        let repo_root = PathBuf::from(&global.skill_repository);
        let src = skill_source(&repo_root, skill)?;

        let overrides = project
            .skill_map
            .entry(skill.to_string())
            .or_default()
            .clone();

        let mut out = String::new();
        for agent in &project.agents {
            let target = resolve_skill_target(
                &self.project_root,
                skill,
                agent,
                Some(&overrides),
                &self.catalog,
            )?;
            copy_tree(&src, &target)?;
            info!(skill = %skill, agent = %agent, target = %target.display(), "synced skill");
            out.push_str(&format!(
                "Synced {} for {} -> {}\n",
                skill,
                agent,
                target.display()
            ));
        }

        write_project_config(&self.project_root, &project)?;
        Ok(out.trim_end().to_string())
    }

    fn run_remove(&self, skill: &str) -> Result<String, SyncError> {
        let mut project = load_project_config(&self.project_root)?;
        self.catalog.ensure_supported(&project.agents)?;
        let overrides = project
            .skill_map
            .get(skill)
            .cloned()
            .ok_or_else(|| SyncError::SkillNotRegistered(skill.to_string()))?;

        let mut out = String::new();
        for agent in &project.agents {
            let target = resolve_skill_target(
                &self.project_root,
                skill,
                agent,
                Some(&overrides),
                &self.catalog,
            )?;
            match fs::remove_dir_all(&target) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(SyncError::io(&target, e)),
            }
            info!(skill = %skill, agent = %agent, target = %target.display(), "removed skill");
            out.push_str(&format!(
                "Removed {} for {} -> {}\n",
                skill,
                agent,
                target.display()
            ));
        }

        project.skill_map.remove(skill);
        write_project_config(&self.project_root, &project)?;
        Ok(out.trim_end().to_string())
    }

    fn run_sync(&self) -> Result<String, SyncError> {
        let global = self.load_global()?;
        let project = load_project_config(&self.project_root)?;
        self.catalog.ensure_supported(&project.agents)?;
        if project.skill_map.is_empty() {
            return Ok(format!(
                "No skills registered in {}",
                PROJECT_CONFIG_NAME
            ));
        }

        let repo_root = PathBuf::from(&global.skill_repository);
        let mut out = String::new();
        for (skill, overrides) in &project.skill_map {
            let src = skill_source(&repo_root, skill)?;
            for agent in &project.agents {
                let target = resolve_skill_target(
                    &self.project_root,
                    skill,
                    agent,
                    Some(overrides),
                    &self.catalog,
                )?;
                copy_tree(&src, &target)?;
                info!(skill = %skill, agent = %agent, target = %target.display(), "synced skill");
                out.push_str(&format!(
                    "Synced {} for {} -> {}\n",
                    skill,
                    agent,
                    target.display()
                ));
            }
        }
        Ok(out.trim_end().to_string())
    }

    fn run_drift(&self) -> Result<String, SyncError> {
        let global = self.load_global()?;
        let project = load_project_config(&self.project_root)?;
        let records = audit_project(
            Path::new(&global.skill_repository),
            &self.project_root,
            &project,
            &self.catalog,
        )?;
        Ok(format_drift_report(&records))
    }
}

fn prompt_repository() -> Result<String, SyncError> {
    let repo: String = Input::new()
        .with_prompt("Central skill repository path")
        .interact_text()
        .map_err(|e| SyncError::Prompt(e.to_string()))?;
    let repo = repo.trim().to_string();
    if repo.is_empty() {
        return Err(SyncError::Prompt("skill repository path is empty".to_string()));
    }
    Ok(repo)
}

fn prompt_agents(catalog: &AgentCatalog) -> Result<Vec<String>, SyncError> {
    let names: Vec<&str> = catalog.names().collect();
    let chosen = MultiSelect::new()
        .with_prompt("Select agents used in this project")
        .items(&names)
        .interact()
        .map_err(|e| SyncError::Prompt(e.to_string()))?;
    if chosen.is_empty() {
        return Err(SyncError::Prompt("no agents selected".to_string()));
    }
    Ok(chosen.into_iter().map(|i| names[i].to_string()).collect())
}
