//! Terminal front end: Elm-style loop, views and widgets.

pub mod app;
pub mod events;
pub mod format;
pub mod layout;
pub mod services;
pub mod sidebar;
pub mod theme;
pub mod views;
pub mod widgets;
