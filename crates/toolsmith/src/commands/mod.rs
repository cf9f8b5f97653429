//! CLI command handlers.

pub mod config;
pub mod jwt;
pub mod plugin;
pub mod update;
