//! Crate-internal test suite.
//!
//! - `common`: fixtures shared with the view tests
//! - `unit`: console flows against a mocked [`CloudApi`](crate::core::api::CloudApi)
//! - `property`: proptest invariants for rollups and formatting
//! - `integration`: the HTTP client against a wiremock server

pub mod common;
mod integration;
mod property;
mod unit;
