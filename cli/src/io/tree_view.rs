//! Directory tree text providers and the before/after diff.

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use similar::TextDiff;
use tracing::{debug, warn};
use wait_timeout::ChildExt;
use walkdir::WalkDir;

pub const DEFAULT_TREE_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of directory-tree text for a course root.
///
/// Two interchangeable providers exist: the external `tree` binary and a
/// pure in-process renderer. Flows take the source as a parameter so
/// tests can pin the deterministic one.
pub trait TreeSource {
    fn tree_text(&self, root: &Path) -> Result<String>;
}

/// Spawns the external `tree` command with a bounded timeout.
///
/// Falls back to [`FallbackTree`] when the binary is missing, exits
/// non-zero, or exceeds the timeout.
#[derive(Debug, Clone)]
pub struct TreeCommand {
    pub timeout: Duration,
}

impl Default for TreeCommand {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TREE_TIMEOUT,
        }
    }
}

impl TreeSource for TreeCommand {
    fn tree_text(&self, root: &Path) -> Result<String> {
        match self.run_tree(root) {
            Ok(Some(text)) => Ok(text),
            Ok(None) => FallbackTree.tree_text(root),
            Err(err) => {
                debug!(err = %err, "tree command unavailable, using fallback");
                FallbackTree.tree_text(root)
            }
        }
    }
}

impl TreeCommand {
    fn run_tree(&self, root: &Path) -> Result<Option<String>> {
        let mut child = Command::new("tree")
            .current_dir(root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .context("spawn tree")?;

        let status = match child.wait_timeout(self.timeout).context("wait for tree")? {
            Some(status) => status,
            None => {
                warn!(timeout_secs = self.timeout.as_secs(), "tree timed out, killing");
                child.kill().context("kill tree")?;
                child.wait().context("wait tree after kill")?;
                return Ok(None);
            }
        };

        let output = child.wait_with_output().context("collect tree output")?;
        if !status.success() {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
    }
}

/// In-process renderer producing indentation-based tree text.
///
/// Entries are sorted by name at every level so the output is stable.
#[derive(Debug, Clone, Default)]
pub struct FallbackTree;

impl TreeSource for FallbackTree {
    fn tree_text(&self, root: &Path) -> Result<String> {
        let mut text = String::from(".\n");
        for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            let entry = entry.with_context(|| format!("walk {}", root.display()))?;
            for _ in 1..entry.depth() {
                text.push_str("    ");
            }
            text.push_str(&entry.file_name().to_string_lossy());
            text.push('\n');
        }
        Ok(text)
    }
}

/// Unified diff of two tree renderings, labelled before/after.
pub fn unified_tree_diff(old: &str, new: &str) -> String {
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(3)
        .header("Before changes", "After changes")
        .to_string()
}
