//! Filesystem mutations as immutable values, decoupled from execution.

use anyhow::Result;

use crate::core::guard::check_relative;
use crate::core::steps::StepType;

/// Mode bits for generated step scripts (owner rwx, group/other rx).
pub const SCRIPT_MODE: u32 = 0o755;

/// One filesystem action against a course directory.
///
/// All paths are relative to the course root and have already passed
/// [`check_relative`]: the constructors refuse unsafe paths, so holding a
/// `FileOperation` implies its paths were accepted. Execution re-checks
/// the symlink-resolved targets (see [`crate::io::executor`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOperation {
    /// Create a directory and any missing parents. Idempotent.
    CreateDirAll { path: String },
    /// Write (or overwrite) a file with the given content.
    WriteFile { path: String, content: String },
    /// Change permission bits on an existing path.
    Chmod { path: String, mode: u32 },
    /// Rename or move a path; `to` is validated like any target path.
    Rename { from: String, to: String },
}

impl FileOperation {
    pub fn create_dir_all(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        check_relative(&path)?;
        Ok(Self::CreateDirAll { path })
    }

    pub fn write_file(path: impl Into<String>, content: impl Into<String>) -> Result<Self> {
        let path = path.into();
        check_relative(&path)?;
        Ok(Self::WriteFile {
            path,
            content: content.into(),
        })
    }

    pub fn chmod(path: impl Into<String>, mode: u32) -> Result<Self> {
        let path = path.into();
        check_relative(&path)?;
        Ok(Self::Chmod { path, mode })
    }

    pub fn rename(from: impl Into<String>, to: impl Into<String>) -> Result<Self> {
        let from = from.into();
        let to = to.into();
        check_relative(&from)?;
        check_relative(&to)?;
        Ok(Self::Rename { from, to })
    }

    /// Primary target path of the operation.
    pub fn path(&self) -> &str {
        match self {
            Self::CreateDirAll { path }
            | Self::WriteFile { path, .. }
            | Self::Chmod { path, .. } => path,
            Self::Rename { from, .. } => from,
        }
    }
}

/// Operations that materialize a freshly inserted step on disk.
///
/// Every step gets `step<N>/step<N>.md` with a title heading. Regular
/// steps add executable `background.sh` and `foreground.sh`; verify
/// steps add a single executable `verify.sh`.
pub fn new_step_operations(
    step_number: u32,
    step_title: &str,
    step_type: StepType,
) -> Result<Vec<FileOperation>> {
    let folder = format!("step{step_number}");
    let mut operations = vec![
        FileOperation::create_dir_all(&folder)?,
        FileOperation::write_file(
            format!("{folder}/step{step_number}.md"),
            format!("# {step_title}\n"),
        )?,
    ];

    match step_type {
        StepType::Regular => {
            let background = format!("{folder}/background.sh");
            let foreground = format!("{folder}/foreground.sh");
            operations.push(FileOperation::write_file(&background, script_body(step_title))?);
            operations.push(FileOperation::write_file(&foreground, script_body(step_title))?);
            operations.push(FileOperation::chmod(&background, SCRIPT_MODE)?);
            operations.push(FileOperation::chmod(&foreground, SCRIPT_MODE)?);
        }
        StepType::Verify => {
            let verify = format!("{folder}/verify.sh");
            operations.push(FileOperation::write_file(&verify, script_body(step_title))?);
            operations.push(FileOperation::chmod(&verify, SCRIPT_MODE)?);
        }
    }
    Ok(operations)
}

fn script_body(step_title: &str) -> String {
    format!("#!/bin/sh\necho \"{step_title} script\"\n")
}
