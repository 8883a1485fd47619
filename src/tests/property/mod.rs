//! Property-based tests
//!
//! Invariants that should hold for every resource list or amount, checked
//! with proptest.
//!
//! ## Test Modules
//!
//! - `rollup_props`: cost and inventory aggregates
//! - `format_props`: rupee formatting and truncation

mod format_props;
mod rollup_props;
