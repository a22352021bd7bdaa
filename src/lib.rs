pub mod app;
pub mod conflict;
pub mod error;
pub mod git;
pub mod history;
pub mod logging;
pub mod navigation;
pub mod render;
pub mod session;
pub mod types;
pub mod ui;
