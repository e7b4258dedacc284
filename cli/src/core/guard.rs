//! Path safety checks applied before any filesystem mutation is built.

use std::path::{Component, Path};

use anyhow::{Result, bail};
use percent_encoding::percent_decode_str;

/// Reject paths that could escape or corrupt the course directory.
///
/// A path fails when it is empty, carries NUL/CR/LF bytes, or — before or
/// after percent-decoding — is absolute or contains a `..` segment.
/// Decoding happens before the traversal check so `%2e%2e%2f` cannot
/// smuggle a `../` past the raw-text check.
pub fn check_relative(path: &str) -> Result<()> {
    if path.is_empty() {
        bail!("unsafe path: empty path");
    }
    check_characters(path)?;
    check_traversal(path)?;

    let decoded = percent_decode_str(path).decode_utf8_lossy();
    check_characters(&decoded)?;
    check_traversal(&decoded)?;
    Ok(())
}

fn check_characters(path: &str) -> Result<()> {
    if path.contains('\0') {
        bail!("unsafe path {path:?}: null byte");
    }
    if path.contains('\r') || path.contains('\n') {
        bail!("unsafe path {path:?}: invalid character");
    }
    Ok(())
}

fn check_traversal(path: &str) -> Result<()> {
    let parsed = Path::new(path);
    if parsed.is_absolute() || path.starts_with('/') {
        bail!("unsafe path {path:?}: absolute path");
    }
    for component in parsed.components() {
        match component {
            Component::ParentDir => bail!("unsafe path {path:?}: path traversal"),
            Component::Prefix(_) => bail!("unsafe path {path:?}: absolute path"),
            _ => {}
        }
    }
    Ok(())
}
