//! Structural validation of a course directory against its manifest.

use std::fs;
use std::path::Path;

use anyhow::Result;
use serde_json::Value;

/// Outcome of [`validate_course`]: manifest problems are reported as a
/// value, never raised to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseStatus {
    pub valid: bool,
    pub message: String,
}

impl CourseStatus {
    fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }

    fn ok() -> Self {
        Self {
            valid: true,
            message: "Valid".to_string(),
        }
    }
}

/// Check a course for structural completeness.
///
/// Checks run in order and the first failure wins: manifest present,
/// non-empty, valid JSON, required fields, steps present, every step
/// titled with an existing text file, and every referenced verify or
/// background script present on disk.
pub fn validate_course(course_path: &Path) -> CourseStatus {
    match validate_course_inner(course_path) {
        Ok(status) => status,
        Err(err) => CourseStatus::fail(format!("Validation error: {err}")),
    }
}

fn validate_course_inner(course_path: &Path) -> Result<CourseStatus> {
    let index_path = course_path.join("index.json");
    if !index_path.exists() {
        return Ok(CourseStatus::fail("Missing index.json file"));
    }

    let raw = fs::read_to_string(&index_path)?;
    let content = raw.trim();
    if content.is_empty() {
        return Ok(CourseStatus::fail("Empty index.json file"));
    }

    let index_data: Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(_) => return Ok(CourseStatus::fail("Invalid JSON in index.json")),
    };
    if !is_truthy(&index_data) {
        return Ok(CourseStatus::fail("Empty JSON object in index.json"));
    }

    for key in ["title", "description", "details"] {
        if !index_data.get(key).is_some_and(is_truthy) {
            return Ok(CourseStatus::fail("Missing required fields"));
        }
    }

    let steps = match index_data["details"].get("steps") {
        Some(steps) if is_truthy(steps) => steps.as_array().cloned().unwrap_or_default(),
        _ => return Ok(CourseStatus::fail("Missing steps in index.json")),
    };

    for (i, step) in steps.iter().enumerate() {
        let number = i + 1;
        let titled = step.get("title").is_some_and(is_truthy);
        let texted = step.get("text").is_some_and(is_truthy);
        if !titled || !texted {
            return Ok(CourseStatus::fail(format!(
                "Step {number} missing required fields"
            )));
        }

        let text = step["text"].as_str().unwrap_or_default();
        if !course_path.join(text).exists() {
            return Ok(CourseStatus::fail(format!("Missing step file: {text}")));
        }

        if let Some(verify) = step.get("verify").and_then(Value::as_str) {
            if !course_path.join(verify).exists() {
                return Ok(CourseStatus::fail(format!(
                    "Missing verify script: {verify}"
                )));
            }
        }
        if let Some(background) = step.get("background").and_then(Value::as_str) {
            if !course_path.join(background).exists() {
                return Ok(CourseStatus::fail(format!(
                    "Missing background script: {background}"
                )));
            }
        }
    }

    Ok(CourseStatus::ok())
}

/// A field counts as present only when it is non-null and non-empty.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Batch validation with a per-check report on stdout.
///
/// A totally empty directory passes trivially; a non-empty directory
/// without `index.json` fails. Returns the overall pass/fail.
pub fn validate_all(base_path: &Path) -> Result<bool> {
    println!("\n=== Scenario Validation ===");

    let index_path = base_path.join("index.json");
    if !index_path.exists() {
        if fs::read_dir(base_path)?.next().is_none() {
            print_status("empty-directory", true, "");
            print_footer(base_path, true)?;
            return Ok(true);
        }
        print_status("index.json", false, "File not found");
        return Ok(false);
    }

    let raw = fs::read_to_string(&index_path)?;
    let content = raw.trim();
    if content.is_empty() {
        print_status("index.json", false, "Empty file");
        return Ok(false);
    }

    let index_data: Value = match serde_json::from_str(content) {
        Ok(value) => {
            print_status("json-syntax", true, "");
            value
        }
        Err(_) => {
            print_status("json-syntax", false, "Invalid JSON");
            return Ok(false);
        }
    };

    let Some(steps) = index_data
        .get("details")
        .and_then(|details| details.get("steps"))
        .and_then(Value::as_array)
    else {
        print_status("steps-structure", false, "Missing steps array");
        return Ok(false);
    };

    let mut all_valid = true;
    for (i, step) in steps.iter().enumerate() {
        let check = format!("step-{}", i + 1);
        let Some(text) = step.get("text").and_then(Value::as_str) else {
            print_status(&check, false, "Missing text field");
            all_valid = false;
            continue;
        };

        let exists = base_path.join(text).exists();
        let message = if exists {
            String::new()
        } else {
            format!("Missing {text}")
        };
        print_status(&check, exists, &message);
        all_valid = all_valid && exists;
    }

    print_footer(base_path, all_valid)?;
    Ok(all_valid)
}

fn print_status(check: &str, status: bool, message: &str) {
    let symbol = if status { "[+]" } else { "[-]" };
    let result = if status { "ok" } else { "failed" };
    if message.is_empty() {
        println!("{symbol}{check:<50} {result}");
    } else {
        println!("{symbol}{check:<50} {result} - {message}");
    }
}

fn print_footer(base_path: &Path, passed: bool) -> Result<()> {
    let verdict = if passed { "PASSED" } else { "FAILED" };
    println!("\nValidation Status: {verdict}");
    println!("Location: {}", std::path::absolute(base_path)?.display());
    Ok(())
}
