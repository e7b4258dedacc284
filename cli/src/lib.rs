//! Authoring helper for interactive scenario courses.
//!
//! A course is a directory of numbered `step<N>` folders (or legacy
//! `step<N>.md` files) plus an `index.json` manifest that orders and
//! describes them. This crate keeps the two representations consistent
//! while inserting steps at arbitrary positions. The architecture
//! enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (path guard, operation
//!   values, renaming planner, manifest updates). No I/O, fully testable
//!   in isolation.
//! - **[`io`]**: Side-effecting operations (filesystem mutation, prompts,
//!   external process execution). Isolated to enable mocking in tests.
//!
//! Orchestration modules ([`add_step`], [`validate`]) coordinate core
//! logic with I/O to implement CLI commands.

pub mod add_step;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod validate;
