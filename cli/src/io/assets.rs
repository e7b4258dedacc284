//! Local scaffold for the conventional assets layout.

use std::path::Path;

use anyhow::Result;

use crate::core::ops::FileOperation;
use crate::io::executor::execute;

/// Create `assets/host01/` through the guarded operation pipeline.
///
/// Returns the created paths for display. Idempotent: re-running against
/// an existing layout succeeds and leaves files untouched.
pub fn scaffold_assets(root: &Path) -> Result<Vec<String>> {
    let operations = vec![
        FileOperation::create_dir_all("assets/host01")?,
        FileOperation::write_file("assets/host01/.gitkeep", "")?,
    ];
    execute(root, &operations)?;
    Ok(operations
        .iter()
        .map(|op| op.path().to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaffold_creates_host_directory() {
        let temp = tempfile::tempdir().expect("tempdir");
        let created = scaffold_assets(temp.path()).expect("scaffold");
        assert!(temp.path().join("assets/host01").is_dir());
        assert!(temp.path().join("assets/host01/.gitkeep").is_file());
        assert_eq!(created, vec!["assets/host01", "assets/host01/.gitkeep"]);
    }

    #[test]
    fn scaffold_is_idempotent() {
        let temp = tempfile::tempdir().expect("tempdir");
        scaffold_assets(temp.path()).expect("first");
        scaffold_assets(temp.path()).expect("second");
    }
}
