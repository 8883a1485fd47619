pub mod api;
pub mod console;
pub mod logging;
pub mod models;
pub mod rollup;
pub mod session;
