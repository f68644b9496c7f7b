//! Drift audit scenarios over real filesystem trees.

use skillsync::agent::AgentCatalog;
use skillsync::config::ProjectConfig;
use skillsync::drift::{audit_project, DriftStatus};
use skillsync::error::SyncError;
use skillsync::repository::SKILL_MARKER;
use skillsync::resolve::resolve_skill_target;
use skillsync::tree::copy_tree;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread::sleep;
use std::time::Duration;
use tempfile::TempDir;

struct Fixture {
    _tmp: TempDir,
    repo: PathBuf,
    project: PathBuf,
    catalog: AgentCatalog,
}

fn fixture() -> Fixture {
    let tmp = TempDir::new().unwrap();
    let repo = tmp.path().join("repo");
    let project = tmp.path().join("project");
    fs::create_dir_all(&repo).unwrap();
    fs::create_dir_all(&project).unwrap();
    Fixture {
        _tmp: tmp,
        repo,
        project,
        catalog: AgentCatalog::builtin(),
    }
}

fn add_repo_skill(repo: &Path, name: &str, files: &[(&str, &str)]) -> PathBuf {
    let dir = repo.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(SKILL_MARKER), format!("# {}\n", name)).unwrap();
    for (rel, content) in files {
        fs::write(dir.join(rel), content).unwrap();
    }
    dir
}

fn project_config(agents: &[&str], skills: &[&str]) -> ProjectConfig {
    ProjectConfig {
        agents: agents.iter().map(|a| a.to_string()).collect(),
        skill_map: skills
            .iter()
            .map(|s| (s.to_string(), BTreeMap::new()))
            .collect(),
    }
}

fn deploy(fixture: &Fixture, skill: &str, agent: &str) -> PathBuf {
    let src = fixture.repo.join(skill);
    let target =
        resolve_skill_target(&fixture.project, skill, agent, None, &fixture.catalog).unwrap();
    copy_tree(&src, &target).unwrap();
    target
}

#[test]
fn in_sync_skills_are_omitted() {
    let fixture = fixture();
    add_repo_skill(&fixture.repo, "review", &[("guide.md", "v1")]);
    deploy(&fixture, "review", "codex");
    deploy(&fixture, "review", "kilo-code");

    let cfg = project_config(&["codex", "kilo-code"], &["review"]);
    let records =
        audit_project(&fixture.repo, &fixture.project, &cfg, &fixture.catalog).unwrap();
    assert!(records.is_empty());
}

#[test]
fn undeployed_skill_is_project_missing() {
    let fixture = fixture();
    add_repo_skill(&fixture.repo, "review", &[("guide.md", "v1")]);

    let cfg = project_config(&["codex"], &["review"]);
    let records =
        audit_project(&fixture.repo, &fixture.project, &cfg, &fixture.catalog).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].skill, "review");
    assert_eq!(records[0].status, DriftStatus::ProjectMissing);
    assert!(records[0].repo_time.is_some());
    assert!(records[0].project_time.is_none());
}

#[test]
fn repo_modified_after_deploy_is_repo_newer() {
    let fixture = fixture();
    add_repo_skill(&fixture.repo, "review", &[("guide.md", "v1")]);
    deploy(&fixture, "review", "codex");

    sleep(Duration::from_millis(20));
    fs::write(fixture.repo.join("review/guide.md"), "v2").unwrap();

    let cfg = project_config(&["codex"], &["review"]);
    let records =
        audit_project(&fixture.repo, &fixture.project, &cfg, &fixture.catalog).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, DriftStatus::RepoNewer);
}

#[test]
fn locally_edited_copy_is_project_newer() {
    // One agent's copy stays equal to the source; the other is edited after
    // deployment. The content mismatch flags the skill, and the edited copy's
    // newer mtime drives the status.
    let fixture = fixture();
    add_repo_skill(&fixture.repo, "review", &[("guide.md", "v1")]);
    deploy(&fixture, "review", "codex");
    let kilo_target = deploy(&fixture, "review", "kilo-code");

    sleep(Duration::from_millis(20));
    fs::write(kilo_target.join("guide.md"), "local edit").unwrap();

    let cfg = project_config(&["codex", "kilo-code"], &["review"]);
    let records =
        audit_project(&fixture.repo, &fixture.project, &cfg, &fixture.catalog).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].skill, "review");
    assert_eq!(records[0].status, DriftStatus::ProjectNewer);
}

#[test]
fn extra_file_in_copy_is_drift() {
    let fixture = fixture();
    add_repo_skill(&fixture.repo, "review", &[("guide.md", "v1")]);
    let target = deploy(&fixture, "review", "codex");
    fs::write(target.join("notes.txt"), "scratch").unwrap();

    let cfg = project_config(&["codex"], &["review"]);
    let records =
        audit_project(&fixture.repo, &fixture.project, &cfg, &fixture.catalog).unwrap();
    assert_eq!(records.len(), 1);
}

#[test]
fn skill_missing_from_repository_aborts_audit() {
    let fixture = fixture();
    let cfg = project_config(&["codex"], &["ghost"]);
    let err =
        audit_project(&fixture.repo, &fixture.project, &cfg, &fixture.catalog).unwrap_err();
    assert!(matches!(err, SyncError::SkillNotFound(name) if name == "ghost"));
}

#[test]
fn unknown_agent_aborts_before_any_walk() {
    let fixture = fixture();
    add_repo_skill(&fixture.repo, "review", &[]);
    let cfg = project_config(&["emacs"], &["review"]);
    let err =
        audit_project(&fixture.repo, &fixture.project, &cfg, &fixture.catalog).unwrap_err();
    assert!(matches!(err, SyncError::UnsupportedAgent(name) if name == "emacs"));
}

#[test]
fn records_come_back_in_skill_name_order() {
    let fixture = fixture();
    add_repo_skill(&fixture.repo, "zeta", &[("guide.md", "z")]);
    add_repo_skill(&fixture.repo, "alpha", &[("guide.md", "a")]);

    let cfg = project_config(&["codex"], &["zeta", "alpha"]);
    let records =
        audit_project(&fixture.repo, &fixture.project, &cfg, &fixture.catalog).unwrap();

    let names: Vec<_> = records.iter().map(|r| r.skill.as_str()).collect();
    assert_eq!(names, vec!["alpha", "zeta"]);
}
