//! Interactive scaffolding for a new course.

use std::path::Path;

use anyhow::{Result, bail};
use serde_json::{Map, json};

use crate::core::manifest::{Details, Manifest};
use crate::core::ops::FileOperation;
use crate::io::course::{CoursePaths, write_manifest};
use crate::io::executor::execute;
use crate::io::prompt::Prompter;

pub const DIFFICULTY_CHOICES: [&str; 3] = ["beginner", "intermediate", "advanced"];

/// Backend image ids offered during init.
pub const BACKEND_IMAGES: [&str; 3] = [
    "kubernetes-kubeadm-1node",
    "kubernetes-kubeadm-2nodes",
    "ubuntu",
];

const INTRO_PLACEHOLDER: &str = "# Introduction\n";
const FINISH_PLACEHOLDER: &str = "# Finish\n";

fn duration_choices() -> Vec<String> {
    (15..50).step_by(5).map(|m| format!("{m} minutes")).collect()
}

/// Create `index.json` plus `intro.md`/`finish.md` in `root`.
///
/// Fails if `index.json` already exists; existing intro/finish files are
/// left alone. Metadata is collected through `prompter`.
pub fn init_course(root: &Path, prompter: &dyn Prompter) -> Result<CoursePaths> {
    let paths = CoursePaths::new(root);
    if paths.index_path.exists() {
        bail!("index.json already exists; edit the existing file");
    }

    let title = prompter.input("Scenario title")?;
    let description = prompter.input("Scenario description")?;
    let difficulty =
        DIFFICULTY_CHOICES[prompter.select("Difficulty", &DIFFICULTY_CHOICES)?];
    let durations = duration_choices();
    let duration_labels: Vec<&str> = durations.iter().map(String::as_str).collect();
    let time = durations[prompter.select("Expected duration", &duration_labels)?].clone();
    let imageid = BACKEND_IMAGES[prompter.select("Backend image", &BACKEND_IMAGES)?];
    let ide = prompter.confirm("Enable the IDE layout?", true)?;

    let manifest = new_manifest(&title, &description, difficulty, &time, imageid, ide);
    write_manifest(&paths.index_path, &manifest)?;

    let mut operations = Vec::new();
    if !paths.intro_path.exists() {
        operations.push(FileOperation::write_file("intro.md", INTRO_PLACEHOLDER)?);
    }
    if !paths.finish_path.exists() {
        operations.push(FileOperation::write_file("finish.md", FINISH_PLACEHOLDER)?);
    }
    execute(root, &operations)?;

    Ok(paths)
}

fn new_manifest(
    title: &str,
    description: &str,
    difficulty: &str,
    time: &str,
    imageid: &str,
    ide: bool,
) -> Manifest {
    Manifest {
        title: Some(title.to_string()),
        description: Some(description.to_string()),
        difficulty: Some(difficulty.to_string()),
        time: Some(time.to_string()),
        details: Details {
            intro: Some(json!({ "text": "intro.md" })),
            steps: Vec::new(),
            finish: Some(json!({ "text": "finish.md" })),
            assets: Some(json!({ "host01": [] })),
            extra: Map::new(),
        },
        backend: Some(json!({ "imageid": imageid })),
        interface: ide.then(|| json!({ "layout": "ide" })),
        extra: Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::course::load_manifest;
    use crate::test_support::ScriptedPrompter;
    use std::fs;

    fn scripted() -> ScriptedPrompter {
        ScriptedPrompter::new()
            .with_inputs(["Kubernetes basics", "Learn kubectl"])
            .with_selects([0, 2, 0])
            .with_confirms([true])
    }

    #[test]
    fn init_writes_manifest_and_placeholders() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = init_course(temp.path(), &scripted()).expect("init");

        let manifest = load_manifest(&paths.index_path).expect("load");
        assert_eq!(manifest.title.as_deref(), Some("Kubernetes basics"));
        assert_eq!(manifest.difficulty.as_deref(), Some("beginner"));
        assert_eq!(manifest.time.as_deref(), Some("25 minutes"));
        assert!(manifest.details.steps.is_empty());
        assert_eq!(
            manifest.backend,
            Some(json!({ "imageid": "kubernetes-kubeadm-1node" }))
        );
        assert_eq!(manifest.interface, Some(json!({ "layout": "ide" })));

        let intro = fs::read_to_string(&paths.intro_path).expect("intro");
        assert_eq!(intro, INTRO_PLACEHOLDER);
        assert!(paths.finish_path.is_file());
    }

    #[test]
    fn init_refuses_existing_manifest() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(temp.path().join("index.json"), "{}").expect("seed");
        let err = init_course(temp.path(), &scripted()).expect_err("must refuse");
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn init_keeps_existing_intro() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(temp.path().join("intro.md"), "custom intro\n").expect("seed");
        let paths = init_course(temp.path(), &scripted()).expect("init");
        let intro = fs::read_to_string(&paths.intro_path).expect("intro");
        assert_eq!(intro, "custom intro\n");
    }

    #[test]
    fn declined_ide_layout_omits_interface() {
        let temp = tempfile::tempdir().expect("tempdir");
        let prompter = ScriptedPrompter::new()
            .with_inputs(["t", "d"])
            .with_selects([1, 0, 2])
            .with_confirms([false]);
        let paths = init_course(temp.path(), &prompter).expect("init");
        let manifest = load_manifest(&paths.index_path).expect("load");
        assert!(manifest.interface.is_none());
        assert_eq!(manifest.backend, Some(json!({ "imageid": "ubuntu" })));
    }
}
