//! Stable exit codes for scenario-cli commands.

/// Command succeeded; for `validate`, the course passed every check.
pub const OK: i32 = 0;
/// Command failed: invalid course layout, unsafe path, or bad user input.
pub const INVALID: i32 = 1;
