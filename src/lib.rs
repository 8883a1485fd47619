/// Cloud Console - multi-cloud resource manager (TUI Edition)
///
/// Core library providing the session and permission model, the resource
/// API client, cost and inventory rollups, and the terminal front end.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
