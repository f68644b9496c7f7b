//! Skill discovery in the central repository.
//!
//! A skill is an immediate subdirectory of the repository root containing a
//! `SKILL.md` marker file, named after that subdirectory.

use crate::error::SyncError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Marker file that identifies a repository subdirectory as a skill.
pub const SKILL_MARKER: &str = "SKILL.md";

/// Resolve the source directory for `skill` inside the repository.
///
/// Hard stop when the skill is absent; callers never skip past a missing
/// skill silently.
pub fn skill_source(repo_root: &Path, skill: &str) -> Result<PathBuf, SyncError> {
    let src = repo_root.join(skill);
    match fs::metadata(&src) {
        Ok(meta) if meta.is_dir() => Ok(src),
        Ok(_) => Err(SyncError::SkillNotFound(skill.to_string())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(SyncError::SkillNotFound(skill.to_string()))
        }
        Err(e) => Err(SyncError::io(src, e)),
    }
}

/// Sorted names of every skill found in the repository.
pub fn list_skills(repo_root: &Path) -> Result<Vec<String>, SyncError> {
    let meta = fs::metadata(repo_root).map_err(|e| SyncError::io(repo_root, e))?;
    if !meta.is_dir() {
        return Err(SyncError::NotADirectory(repo_root.to_path_buf()));
    }

    let mut skills = Vec::new();
    let entries = fs::read_dir(repo_root).map_err(|e| SyncError::io(repo_root, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| SyncError::io(repo_root, e))?;
        let path = entry.path();
        let meta = fs::metadata(&path).map_err(|e| SyncError::io(&path, e))?;
        if !meta.is_dir() {
            continue;
        }
        if has_marker(&path)? {
            skills.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    skills.sort();
    Ok(skills)
}

fn has_marker(dir: &Path) -> Result<bool, SyncError> {
    let marker = dir.join(SKILL_MARKER);
    match fs::metadata(&marker) {
        Ok(meta) => Ok(meta.is_file()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(SyncError::io(marker, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn add_skill(repo: &Path, name: &str) {
        let dir = repo.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(SKILL_MARKER), format!("# {}\n", name)).unwrap();
    }

    #[test]
    fn lists_marked_directories_sorted() {
        let tmp = TempDir::new().unwrap();
        add_skill(tmp.path(), "review");
        add_skill(tmp.path(), "deploy");
        // Unmarked directory and loose file are ignored.
        fs::create_dir_all(tmp.path().join("notes")).unwrap();
        fs::write(tmp.path().join("README.md"), "readme").unwrap();

        let skills = list_skills(tmp.path()).unwrap();
        assert_eq!(skills, vec!["deploy", "review"]);
    }

    #[test]
    fn missing_skill_is_a_lookup_error() {
        let tmp = TempDir::new().unwrap();
        let err = skill_source(tmp.path(), "absent").unwrap_err();
        assert!(matches!(err, SyncError::SkillNotFound(name) if name == "absent"));
    }

    #[test]
    fn skill_source_resolves_existing_directory() {
        let tmp = TempDir::new().unwrap();
        add_skill(tmp.path(), "review");
        let src = skill_source(tmp.path(), "review").unwrap();
        assert_eq!(src, tmp.path().join("review"));
    }
}
