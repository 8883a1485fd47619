pub mod access;
pub mod cost;
pub mod dashboard;
pub mod login;
pub mod logs;
pub mod modal;
pub mod monitoring;
pub mod resource_form;
pub mod resources;
pub mod settings;
