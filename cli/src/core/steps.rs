//! Step index scanning and the renaming planner.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use anyhow::{Result, bail};
use regex::Regex;

/// Step number to entry name (`stepN` directory or `stepN.md` file).
pub type StepMap = BTreeMap<u32, String>;

/// A single course directory entry, detached from the live filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseEntry {
    pub name: String,
    pub is_dir: bool,
}

impl CourseEntry {
    pub fn new(name: impl Into<String>, is_dir: bool) -> Self {
        Self {
            name: name.into(),
            is_dir,
        }
    }
}

/// Closed set of step kinds; user-facing tokens are parsed exactly once
/// at the boundary so raw strings never reach the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepType {
    /// Step backed by `background.sh` and `foreground.sh`.
    Regular,
    /// Step backed by a single `verify.sh`.
    Verify,
}

impl StepType {
    pub fn parse(token: &str) -> Result<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "r" | "regular" => Ok(Self::Regular),
            "v" | "verify" => Ok(Self::Verify),
            other => bail!("unknown step type '{other}': expected 'r' (regular) or 'v' (verify)"),
        }
    }
}

static STEP_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^step(\d+)(\.md)?$").expect("step name pattern"));

/// Build a [`StepMap`] from a directory listing.
///
/// Accepts `step<digits>` directories and `step<digits>.md` entries;
/// anything else is silently skipped, including `step` names whose
/// suffix does not parse as an integer. That filter is deliberate: stray
/// files like `steps.md` or `step-notes` are not an error.
pub fn scan(entries: &[CourseEntry]) -> StepMap {
    let mut steps = StepMap::new();
    for entry in entries {
        let Some(captures) = STEP_NAME.captures(&entry.name) else {
            continue;
        };
        let has_md_suffix = captures.get(2).is_some();
        if !has_md_suffix && !entry.is_dir {
            continue;
        }
        if let Ok(number) = captures[1].parse::<u32>() {
            steps.insert(number, entry.name.clone());
        }
    }
    steps
}

/// Clamp a requested insertion position to the allowed range.
///
/// Valid positions are `1..=highest + 1`; for an empty map only `1`.
pub fn resolve_insert_target(steps: &StepMap, requested: u32) -> Result<u32> {
    let highest = steps.keys().next_back().copied().unwrap_or(0);
    if (1..=highest + 1).contains(&requested) {
        Ok(requested)
    } else {
        bail!(
            "invalid step number: {requested}. Please enter a valid step number between 1 and {}.",
            highest + 1
        )
    }
}

/// Plan the renames that make room for a step inserted at `insert_at`.
///
/// Every step numbered >= `insert_at` maps to `step<n + 1>`, ordered by
/// descending original number: the highest step moves first so no rename
/// lands on a name still occupied by a not-yet-moved neighbor.
pub fn plan_renaming(steps: &StepMap, insert_at: u32) -> Vec<(String, String)> {
    steps
        .range(insert_at..)
        .rev()
        .map(|(number, name)| (name.clone(), format!("step{}", number + 1)))
        .collect()
}
