//! Applies [`FileOperation`] batches to the real filesystem.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::core::ops::FileOperation;

/// Apply operations in order against `root`.
///
/// Each target (and rename destination) is resolved through the
/// filesystem before use: the deepest existing ancestor is
/// canonicalized, so a symlink whose apparent path looked safe but whose
/// real target escapes `root` is rejected. There is no rollback; a
/// failure at operation K leaves operations 1..K-1 applied.
pub fn execute(root: &Path, operations: &[FileOperation]) -> Result<()> {
    let root_real = root
        .canonicalize()
        .with_context(|| format!("resolve course root {}", root.display()))?;

    for operation in operations {
        debug!(?operation, "applying file operation");
        match operation {
            FileOperation::CreateDirAll { path } => {
                let target = resolve_within(&root_real, path)?;
                fs::create_dir_all(&target)
                    .with_context(|| format!("create directory {}", target.display()))?;
            }
            FileOperation::WriteFile { path, content } => {
                let target = resolve_within(&root_real, path)?;
                fs::write(&target, content)
                    .with_context(|| format!("write file {}", target.display()))?;
            }
            FileOperation::Chmod { path, mode } => {
                let target = resolve_within(&root_real, path)?;
                set_mode(&target, *mode)
                    .with_context(|| format!("change permissions on {}", target.display()))?;
            }
            FileOperation::Rename { from, to } => {
                let source = resolve_within(&root_real, from)?;
                let destination = resolve_within(&root_real, to)?;
                fs::rename(&source, &destination).with_context(|| {
                    format!("rename {} to {}", source.display(), destination.display())
                })?;
            }
        }
    }
    Ok(())
}

/// Resolve `relative` under `root_real` and require the real path to
/// stay inside the root.
fn resolve_within(root_real: &Path, relative: &str) -> Result<PathBuf> {
    let real = resolve_existing_prefix(&root_real.join(relative))?;
    if !real.starts_with(root_real) {
        bail!("unsafe path {relative:?}: resolves outside working directory");
    }
    Ok(real)
}

/// Canonicalize the deepest existing ancestor of `path` and reattach the
/// not-yet-existing remainder unchanged.
fn resolve_existing_prefix(path: &Path) -> Result<PathBuf> {
    let mut existing = path.to_path_buf();
    let mut missing: Vec<OsString> = Vec::new();
    while !existing.exists() {
        match existing.file_name() {
            Some(name) => {
                missing.push(name.to_os_string());
                if !existing.pop() {
                    break;
                }
            }
            None => break,
        }
    }
    let mut real = existing
        .canonicalize()
        .with_context(|| format!("resolve path {}", existing.display()))?;
    for part in missing.iter().rev() {
        real.push(part);
    }
    Ok(real)
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}
