//! End-to-end insertion round-trip across mixed step layouts.
//!
//! Builds a course with two step directories and one legacy flat
//! markdown step, inserts in the middle, and verifies the filesystem,
//! the rescanned step map, and the rewritten manifest all agree.

use scenario_cli::add_step::{NewStep, apply_insert};
use scenario_cli::core::manifest::StepRecord;
use scenario_cli::core::steps::{StepType, scan};
use scenario_cli::io::course::{list_entries, load_manifest};
use scenario_cli::test_support::TestCourse;
use scenario_cli::validate::validate_course;

#[test]
fn insertion_shifts_mixed_layout_and_rewrites_manifest() {
    let course = TestCourse::with_regular_steps(2).expect("course");
    course.add_flat_step(3).expect("flat step");
    let mut seeded = load_manifest(&course.root().join("index.json")).expect("load");
    seeded.details.steps.push(StepRecord {
        title: "Step 3".to_string(),
        text: "step3.md".to_string(),
        background: None,
        foreground: None,
        verify: None,
        extra: serde_json::Map::new(),
    });
    course.write_manifest(&seeded).expect("seed manifest");

    let entries = list_entries(course.root()).expect("list");
    let steps = scan(&entries);
    assert_eq!(steps.len(), 3);

    apply_insert(
        course.root(),
        &steps,
        &NewStep {
            title: "Inserted".to_string(),
            number: 2,
            step_type: StepType::Regular,
        },
    )
    .expect("insert");

    // Directory form is preserved through the shift; the flat markdown
    // step stays flat under its new number.
    assert!(course.root().join("step1/step1.md").is_file());
    assert!(course.root().join("step2/step2.md").is_file());
    assert!(course.root().join("step2/background.sh").is_file());
    assert!(course.root().join("step2/foreground.sh").is_file());
    assert!(course.root().join("step3/step3.md").is_file());
    assert!(course.root().join("step3/background.sh").is_file());
    assert!(course.root().join("step4.md").is_file());
    assert!(!course.root().join("step2.md").exists());

    let rescanned = scan(&list_entries(course.root()).expect("list"));
    let names: Vec<(u32, String)> = rescanned.into_iter().collect();
    assert_eq!(
        names,
        vec![
            (1, "step1".to_string()),
            (2, "step2".to_string()),
            (3, "step3".to_string()),
            (4, "step4.md".to_string()),
        ]
    );

    let manifest = load_manifest(&course.root().join("index.json")).expect("load");
    let texts: Vec<&str> = manifest
        .details
        .steps
        .iter()
        .map(|step| step.text.as_str())
        .collect();
    assert_eq!(
        texts,
        vec![
            "step1/step1.md",
            "step2/step2.md",
            "step3/step3.md",
            "step4/step4.md",
        ]
    );
    assert_eq!(manifest.details.steps[1].title, "Inserted");
    assert_eq!(
        manifest.details.steps[2].background.as_deref(),
        Some("step3/background.sh")
    );
}

#[test]
fn insertion_at_front_of_directory_course_stays_valid() {
    let course = TestCourse::with_regular_steps(3).expect("course");
    let steps = scan(&list_entries(course.root()).expect("list"));

    apply_insert(
        course.root(),
        &steps,
        &NewStep {
            title: "Intro check".to_string(),
            number: 1,
            step_type: StepType::Verify,
        },
    )
    .expect("insert");

    let rescanned = scan(&list_entries(course.root()).expect("list"));
    let numbers: Vec<u32> = rescanned.keys().copied().collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);
    assert!(course.root().join("step1/verify.sh").is_file());

    let status = validate_course(course.root());
    assert!(status.valid, "{}", status.message);
}
