//! Data models: time entries, formats and configuration.

pub mod config;
pub mod entry;
pub mod format;
