//! Side-effecting helpers for CLI commands.

pub mod assets;
pub mod course;
pub mod executor;
pub mod init;
pub mod prompt;
pub mod tree_view;
