//! CLI command handlers

pub mod catalog;
pub mod sweep;
