//! Re-exports the terminal front-end's modules so integration tests can
//! exercise config migration, command parsing, and rendering.

pub mod commands;
pub mod config;
pub mod view;
