//! Git identity profile manager.
//!
//! Manages multiple named git identities (user name, email, SSH key) on one
//! workstation by editing conditional-include (`includeIf`) rules in the base
//! `~/.gitconfig` and writing one config fragment per profile under
//! `~/.gitconfigs/`. Which identity applies to a repository is decided by git
//! itself at config-assembly time, based on the rules this tool writes.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]** — well-known paths and the gitconfig document model
//! - **[`profiles`]** — the profile store: create profiles, append activation rules
//! - **[`ssh`]** — key-pair generation and public-key display via `ssh-keygen`
//! - **[`commands`]** — top-level subcommand orchestration (`create`, `add-rules`, …)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod profiles;
pub mod ssh;
