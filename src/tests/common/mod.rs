//! Common Test Utilities
//!
//! Shared fixtures used by the unit, property and view tests.

pub mod fixtures;

pub use fixtures::*;
