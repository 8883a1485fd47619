//! Unit tests for the console flows.
//!
//! The backend is a mockall [`MockCloudApi`](crate::core::api::MockCloudApi),
//! so every test states exactly which calls may reach the server.

mod gating_tests;
mod services_tests;
mod snapshot_tests;
