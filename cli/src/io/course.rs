//! Course directory layout, manifest storage, and rename expansion.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::manifest::Manifest;
use crate::core::ops::FileOperation;
use crate::core::steps::CourseEntry;

/// Canonical paths within a course directory.
#[derive(Debug, Clone)]
pub struct CoursePaths {
    pub root: PathBuf,
    pub index_path: PathBuf,
    pub intro_path: PathBuf,
    pub finish_path: PathBuf,
}

impl CoursePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            index_path: root.join("index.json"),
            intro_path: root.join("intro.md"),
            finish_path: root.join("finish.md"),
            root,
        }
    }
}

/// Load and parse `index.json`.
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parse {}", path.display()))
}

/// Serialize a manifest as pretty-printed JSON with trailing newline.
pub fn write_manifest(path: &Path, manifest: &Manifest) -> Result<()> {
    let mut payload = serde_json::to_string_pretty(manifest).context("serialize manifest")?;
    payload.push('\n');
    fs::write(path, payload).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// List the immediate entries of a course directory.
pub fn list_entries(root: &Path) -> Result<Vec<CourseEntry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(root).with_context(|| format!("read directory {}", root.display()))? {
        let entry = entry.with_context(|| format!("read entry in {}", root.display()))?;
        let file_type = entry.file_type().with_context(|| {
            format!("inspect entry {}", entry.path().display())
        })?;
        entries.push(CourseEntry::new(
            entry.file_name().to_string_lossy().into_owned(),
            file_type.is_dir(),
        ));
    }
    Ok(entries)
}

const STEP_SCRIPTS: [&str; 3] = ["background.sh", "foreground.sh", "verify.sh"];

/// Expand a renaming plan into concrete operations against `root`.
///
/// A directory entry moves piecewise: the destination directory is
/// created first, then each script that actually exists and the step's
/// own markdown file are renamed into it. A bare `step<N>.md` entry is a
/// single rename to `step<N + 1>.md`. The plan's descending order is
/// preserved, so no rename overwrites a not-yet-moved step.
pub fn renaming_operations(
    root: &Path,
    plan: &[(String, String)],
) -> Result<Vec<FileOperation>> {
    let mut operations = Vec::new();
    for (old_name, new_name) in plan {
        if root.join(old_name).is_dir() {
            operations.push(FileOperation::create_dir_all(new_name)?);
            for script in STEP_SCRIPTS {
                if root.join(old_name).join(script).is_file() {
                    operations.push(FileOperation::rename(
                        format!("{old_name}/{script}"),
                        format!("{new_name}/{script}"),
                    )?);
                }
            }
            let old_md = format!("{old_name}/{old_name}.md");
            if root.join(&old_md).is_file() {
                operations.push(FileOperation::rename(
                    old_md,
                    format!("{new_name}/{new_name}.md"),
                )?);
            }
        } else {
            operations.push(FileOperation::rename(
                old_name.clone(),
                format!("{new_name}.md"),
            )?);
        }
    }
    Ok(operations)
}
