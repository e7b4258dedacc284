//! Test-only helpers: course fixtures and a scripted prompter.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde_json::{Map, json};

use crate::core::manifest::{Details, Manifest, StepRecord};
use crate::io::course::{CoursePaths, write_manifest};
use crate::io::prompt::Prompter;

/// Temporary course directory with a manifest and step folders.
pub struct TestCourse {
    temp: tempfile::TempDir,
}

impl TestCourse {
    /// Empty course directory, no manifest yet.
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create temp course")?;
        Ok(Self { temp })
    }

    /// Course with `count` regular step directories and a matching
    /// manifest (each step referencing its markdown and background
    /// script).
    pub fn with_regular_steps(count: u32) -> Result<Self> {
        let course = Self::new()?;
        let mut steps = Vec::new();
        for number in 1..=count {
            course.add_regular_step_dir(number)?;
            steps.push(StepRecord {
                title: format!("Step {number}"),
                text: format!("step{number}/step{number}.md"),
                background: Some(format!("step{number}/background.sh")),
                foreground: None,
                verify: None,
                extra: Map::new(),
            });
        }
        course.write_manifest(&Manifest {
            title: Some("Test course".to_string()),
            description: Some("Fixture".to_string()),
            difficulty: Some("beginner".to_string()),
            time: Some("15 minutes".to_string()),
            details: Details {
                intro: Some(json!({ "text": "intro.md" })),
                steps,
                finish: Some(json!({ "text": "finish.md" })),
                assets: None,
                extra: Map::new(),
            },
            backend: Some(json!({ "imageid": "ubuntu" })),
            interface: None,
            extra: Map::new(),
        })?;
        Ok(course)
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn write_manifest(&self, manifest: &Manifest) -> Result<()> {
        let paths = CoursePaths::new(self.root());
        write_manifest(&paths.index_path, manifest)
    }

    /// `step<N>/` with markdown plus background/foreground scripts.
    pub fn add_regular_step_dir(&self, number: u32) -> Result<()> {
        let dir = self.root().join(format!("step{number}"));
        fs::create_dir_all(&dir).context("create step dir")?;
        fs::write(dir.join(format!("step{number}.md")), format!("# Step {number}\n"))
            .context("write step markdown")?;
        fs::write(dir.join("background.sh"), "#!/bin/sh\necho bg\n")
            .context("write background script")?;
        fs::write(dir.join("foreground.sh"), "#!/bin/sh\necho fg\n")
            .context("write foreground script")?;
        Ok(())
    }

    /// `step<N>/` with markdown plus a verify script only.
    pub fn add_verify_step_dir(&self, number: u32) -> Result<()> {
        let dir = self.root().join(format!("step{number}"));
        fs::create_dir_all(&dir).context("create step dir")?;
        fs::write(dir.join(format!("step{number}.md")), format!("# Step {number}\n"))
            .context("write step markdown")?;
        fs::write(dir.join("verify.sh"), "#!/bin/sh\nexit 0\n")
            .context("write verify script")?;
        Ok(())
    }

    /// Legacy flat `step<N>.md` without a directory.
    pub fn add_flat_step(&self, number: u32) -> Result<()> {
        fs::write(
            self.root().join(format!("step{number}.md")),
            format!("# Step {number}\n"),
        )
        .context("write flat step")?;
        Ok(())
    }
}

/// Prompter replaying queued answers, for deterministic flow tests.
#[derive(Default)]
pub struct ScriptedPrompter {
    inputs: RefCell<VecDeque<String>>,
    selects: RefCell<VecDeque<usize>>,
    confirms: RefCell<VecDeque<bool>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inputs<I, S>(self, answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs
            .borrow_mut()
            .extend(answers.into_iter().map(Into::into));
        self
    }

    pub fn with_selects<I: IntoIterator<Item = usize>>(self, answers: I) -> Self {
        self.selects.borrow_mut().extend(answers);
        self
    }

    pub fn with_confirms<I: IntoIterator<Item = bool>>(self, answers: I) -> Self {
        self.confirms.borrow_mut().extend(answers);
        self
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, prompt: &str) -> Result<String> {
        self.inputs
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted input for '{prompt}'"))
    }

    fn select(&self, prompt: &str, options: &[&str]) -> Result<usize> {
        let index = self
            .selects
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted selection for '{prompt}'"))?;
        if index >= options.len() {
            return Err(anyhow!("scripted selection {index} out of range for '{prompt}'"));
        }
        Ok(index)
    }

    fn confirm(&self, prompt: &str, _default: bool) -> Result<bool> {
        self.confirms
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted confirmation for '{prompt}'"))
    }
}
