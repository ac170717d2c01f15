//! Top-level subcommand orchestration.

pub mod add_rules;
pub mod create;
pub mod show_key;
pub mod version;
