//! Interactive step insertion: plan renames, create files, rewrite the
//! manifest, and show the resulting tree diff.

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::core::manifest::apply_insertion;
use crate::core::ops::new_step_operations;
use crate::core::steps::{StepMap, StepType, plan_renaming, resolve_insert_target, scan};
use crate::io::course::{
    CoursePaths, list_entries, load_manifest, renaming_operations, write_manifest,
};
use crate::io::executor::execute;
use crate::io::prompt::Prompter;
use crate::io::tree_view::{TreeSource, unified_tree_diff};

/// A fully validated insertion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStep {
    pub title: String,
    pub number: u32,
    pub step_type: StepType,
}

/// Collect and validate the new step's title, position, and type.
pub fn collect_new_step(steps: &StepMap, prompter: &dyn Prompter) -> Result<NewStep> {
    let title = prompter.input("Title for the new step")?;

    let highest = steps.keys().next_back().copied().unwrap_or(0);
    let raw_number = prompter.input(&format!(
        "Step number to insert the new step at (1-{})",
        highest + 1
    ))?;
    let requested: u32 = raw_number
        .trim()
        .parse()
        .with_context(|| format!("invalid step number: {raw_number}"))?;
    let number = resolve_insert_target(steps, requested)?;

    let type_token = prompter.input("Type of step (r for regular, v for verify)")?;
    let step_type = StepType::parse(&type_token)?;

    Ok(NewStep {
        title,
        number,
        step_type,
    })
}

/// Insert `new_step` into the course at `root`: shift existing steps,
/// materialize the new one, and rewrite `index.json` to match.
///
/// Renames run before creation so the insertion slot is free; the
/// manifest is written last, after the filesystem reflects the new
/// numbering. A failure partway leaves already-applied operations in
/// place (no rollback).
pub fn apply_insert(root: &Path, steps: &StepMap, new_step: &NewStep) -> Result<()> {
    let paths = CoursePaths::new(root);
    let manifest = load_manifest(&paths.index_path)?;

    let plan = plan_renaming(steps, new_step.number);
    debug!(renames = plan.len(), insert_at = new_step.number, "planned insertion");
    let mut operations = renaming_operations(root, &plan)?;
    operations.extend(new_step_operations(
        new_step.number,
        &new_step.title,
        new_step.step_type,
    )?);

    let updated = apply_insertion(&manifest, new_step.number, &new_step.title, new_step.step_type);

    execute(root, &operations)?;
    write_manifest(&paths.index_path, &updated)?;
    Ok(())
}

/// Full interactive flow for the default command.
pub fn run(root: &Path, prompter: &dyn Prompter, tree: &dyn TreeSource) -> Result<()> {
    let paths = CoursePaths::new(root);
    if !paths.index_path.exists() {
        bail!(
            "index.json not found in {}; run `scenario-cli init` first",
            root.display()
        );
    }

    let before = tree.tree_text(root)?;
    let entries = list_entries(root)?;
    let steps = scan(&entries);

    let new_step = collect_new_step(&steps, prompter)?;
    apply_insert(root, &steps, &new_step)?;

    let after = tree.tree_text(root)?;
    println!("\nFile structure changes:");
    print!("{}", unified_tree_diff(&before, &after));
    Ok(())
}
