//! CLI command handlers

pub mod bookmark;
pub mod config;
pub mod status;
pub mod theme;
