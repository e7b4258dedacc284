//! Deterministic, pure logic for step and manifest management.
//!
//! Core modules must be free of I/O side effects. They operate on
//! in-memory data structures and return deterministic outputs suitable
//! for tests.

pub mod guard;
pub mod manifest;
pub mod ops;
pub mod steps;
