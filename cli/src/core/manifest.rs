//! Typed model of `index.json` and the step-insertion rewrite.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::steps::StepType;

/// Root manifest document.
///
/// Unknown keys are preserved through a read-modify-write via the
/// flattened `extra` maps, so hand-edited manifests survive insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub details: Details,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Details {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<Value>,
    #[serde(default)]
    pub steps: Vec<StepRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of `details.steps`; position in the sequence defines the
/// step number (index `i` is step `i + 1`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StepRecord {
    /// Record for a freshly inserted step, using pre-shift numbering.
    ///
    /// The renumbering loop in [`apply_insertion`] starts after the new
    /// record, so these paths must already be correct at construction.
    fn for_new_step(step_number: u32, step_title: &str, step_type: StepType) -> Self {
        let mut record = Self {
            title: step_title.to_string(),
            text: format!("step{step_number}/step{step_number}.md"),
            background: None,
            foreground: None,
            verify: None,
            extra: Map::new(),
        };
        match step_type {
            StepType::Regular => {
                record.background = Some(format!("step{step_number}/background.sh"));
                record.foreground = Some(format!("step{step_number}/foreground.sh"));
            }
            StepType::Verify => {
                record.verify = Some(format!("step{step_number}/verify.sh"));
            }
        }
        record
    }
}

/// Insert a step record at position `insert_at` and renumber everything
/// behind it, returning a new manifest.
///
/// The input is left untouched; updates are value-producing rather than
/// in-place. Steps after the insertion point get `text` rewritten to the
/// folder matching their new 1-based position, and only script keys a
/// record already carries are renumbered. Fields are never invented.
pub fn apply_insertion(
    manifest: &Manifest,
    insert_at: u32,
    step_title: &str,
    step_type: StepType,
) -> Manifest {
    let mut updated = manifest.clone();
    let record = StepRecord::for_new_step(insert_at, step_title, step_type);

    let index = ((insert_at - 1) as usize).min(updated.details.steps.len());
    updated.details.steps.insert(index, record);

    for position in (insert_at as usize)..updated.details.steps.len() {
        let number = position + 1;
        let step = &mut updated.details.steps[position];
        step.text = format!("step{number}/step{number}.md");
        if step.verify.is_some() {
            step.verify = Some(format!("step{number}/verify.sh"));
        }
        if step.background.is_some() {
            step.background = Some(format!("step{number}/background.sh"));
        }
        if step.foreground.is_some() {
            step.foreground = Some(format!("step{number}/foreground.sh"));
        }
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_step_manifest() -> Manifest {
        serde_json::from_value(serde_json::json!({
            "title": "Sample course",
            "description": "Two steps",
            "details": {
                "intro": {"text": "intro.md"},
                "steps": [
                    {
                        "title": "First",
                        "text": "step1/step1.md",
                        "background": "step1/background.sh"
                    },
                    {
                        "title": "Second",
                        "text": "step2/step2.md",
                        "background": "step2/background.sh"
                    }
                ],
                "finish": {"text": "finish.md"}
            }
        }))
        .expect("manifest fixture")
    }

    #[test]
    fn insertion_at_middle_shifts_following_steps() {
        let manifest = two_step_manifest();
        let updated = apply_insertion(&manifest, 2, "Inserted", StepType::Regular);

        assert_eq!(updated.details.steps.len(), 3);
        let inserted = &updated.details.steps[1];
        assert_eq!(inserted.title, "Inserted");
        assert_eq!(inserted.text, "step2/step2.md");
        assert_eq!(inserted.background.as_deref(), Some("step2/background.sh"));
        assert_eq!(inserted.foreground.as_deref(), Some("step2/foreground.sh"));

        let shifted = &updated.details.steps[2];
        assert_eq!(shifted.title, "Second");
        assert_eq!(shifted.text, "step3/step3.md");
        assert_eq!(shifted.background.as_deref(), Some("step3/background.sh"));

        // Step before the insertion point is untouched.
        assert_eq!(updated.details.steps[0], manifest.details.steps[0]);
    }

    #[test]
    fn verify_insertion_sets_only_verify() {
        let manifest = two_step_manifest();
        let updated = apply_insertion(&manifest, 3, "Check it", StepType::Verify);

        let inserted = &updated.details.steps[2];
        assert_eq!(inserted.text, "step3/step3.md");
        assert_eq!(inserted.verify.as_deref(), Some("step3/verify.sh"));
        assert!(inserted.background.is_none());
        assert!(inserted.foreground.is_none());
    }

    #[test]
    fn renumbering_never_invents_script_fields() {
        let mut manifest = two_step_manifest();
        manifest.details.steps[1].background = None;
        manifest.details.steps[1].verify = Some("step2/verify.sh".to_string());

        let updated = apply_insertion(&manifest, 1, "Front", StepType::Verify);

        let shifted_verify = &updated.details.steps[2];
        assert_eq!(shifted_verify.verify.as_deref(), Some("step3/verify.sh"));
        assert!(shifted_verify.background.is_none());
        assert!(shifted_verify.foreground.is_none());
    }

    #[test]
    fn input_manifest_is_not_mutated() {
        let manifest = two_step_manifest();
        let before = manifest.clone();
        let _ = apply_insertion(&manifest, 1, "Front", StepType::Regular);
        assert_eq!(manifest, before);
    }

    #[test]
    fn unknown_keys_survive_round_trip() {
        let raw = serde_json::json!({
            "title": "t",
            "description": "d",
            "custom-top": 7,
            "details": {
                "steps": [
                    {"title": "s", "text": "step1/step1.md", "code": "step1/code.sh"}
                ],
                "assets": {"host01": []}
            },
            "backend": {"imageid": "ubuntu"}
        });
        let manifest: Manifest = serde_json::from_value(raw).expect("parse");
        assert_eq!(manifest.extra.get("custom-top"), Some(&Value::from(7)));

        let updated = apply_insertion(&manifest, 2, "New", StepType::Verify);
        let out = serde_json::to_value(&updated).expect("serialize");
        assert_eq!(out["custom-top"], Value::from(7));
        assert_eq!(out["details"]["steps"][0]["code"], "step1/code.sh");
        assert_eq!(out["backend"]["imageid"], "ubuntu");
    }

    #[test]
    fn append_at_end_renumbers_nothing() {
        let manifest = two_step_manifest();
        let updated = apply_insertion(&manifest, 3, "Tail", StepType::Regular);
        assert_eq!(updated.details.steps[0], manifest.details.steps[0]);
        assert_eq!(updated.details.steps[1], manifest.details.steps[1]);
        assert_eq!(updated.details.steps[2].text, "step3/step3.md");
    }
}
