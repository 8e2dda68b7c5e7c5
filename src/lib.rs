pub mod app;
pub mod config;
pub mod format;
pub mod help;
pub mod input;
pub mod interaction;
pub mod preferences;
pub mod pricing;
pub mod quote;
pub mod theme;
pub mod ui;
