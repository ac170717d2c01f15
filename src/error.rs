//! Domain-specific error types for the profile manager.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Internal modules return typed errors ([`ConfigError`], [`ProfileError`])
//! while command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! Parse errors are unconditional aborts: the gitconfig grammar this tool
//! accepts has no best-effort or recovery mode, so any structural deviation
//! fails the whole invocation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that arise from parsing or reading a gitconfig document.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A plain section is structurally invalid: a setting line appeared
    /// before any header, or a line did not contain exactly one `=`.
    #[error("malformed section at line {line}: {text}")]
    MalformedSection {
        /// 1-based line number of the offending line.
        line: usize,
        /// The offending line, trimmed.
        text: String,
    },

    /// An `includeIf` directive is structurally invalid: its header does not
    /// carry exactly one quoted payload, the payload does not split into 2 or
    /// 4 colon-separated tokens, or its path line is missing or malformed.
    #[error("malformed includeIf rule at line {line}: {text}")]
    MalformedInclude {
        /// 1-based line number of the offending line.
        line: usize,
        /// The offending line, trimmed.
        text: String,
    },

    /// An I/O error occurred while reading or writing a config document.
    #[error("IO error on config file {path}: {source}")]
    Io {
        /// Path of the document that could not be read or written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise from profile operations.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// The per-profile config fragment already exists on disk.
    #[error("profile '{0}' already exists")]
    AlreadyExists(String),

    /// No activation rule was supplied; a profile without one can never be
    /// selected by git.
    #[error("at least one activation rule (--gitdir, --onbranch or --remote-url) is required")]
    NoActivationRule,

    /// The named profile is not registered in the base document.
    #[error("unknown profile '{name}' (available: {available})")]
    UnknownProfile {
        /// The profile name that was requested.
        name: String,
        /// Comma-separated list of registered profile names.
        available: String,
    },

    /// The external key-generation tool failed or timed out.
    #[error("ssh key generation failed: {0}")]
    KeyGeneration(String),

    /// The base or per-profile document could not be parsed or read.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::io;

    // -----------------------------------------------------------------------
    // ConfigError
    // -----------------------------------------------------------------------

    #[test]
    fn config_error_malformed_section_display() {
        let e = ConfigError::MalformedSection {
            line: 3,
            text: "name A B".to_string(),
        };
        assert_eq!(e.to_string(), "malformed section at line 3: name A B");
    }

    #[test]
    fn config_error_malformed_include_display() {
        let e = ConfigError::MalformedInclude {
            line: 1,
            text: "[includeIf \"gitdir\"]".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "malformed includeIf rule at line 1: [includeIf \"gitdir\"]"
        );
    }

    #[test]
    fn config_error_io_display() {
        let e = ConfigError::Io {
            path: PathBuf::from("/home/u/.gitconfig"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(e.to_string().contains("/home/u/.gitconfig"));
        assert!(e.to_string().contains("IO error"));
    }

    #[test]
    fn config_error_io_has_source() {
        use std::error::Error as StdError;
        let e = ConfigError::Io {
            path: PathBuf::from("/home/u/.gitconfig"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.source().is_some());
    }

    // -----------------------------------------------------------------------
    // ProfileError
    // -----------------------------------------------------------------------

    #[test]
    fn profile_error_already_exists_display() {
        let e = ProfileError::AlreadyExists("work".to_string());
        assert_eq!(e.to_string(), "profile 'work' already exists");
    }

    #[test]
    fn profile_error_no_activation_rule_display() {
        let e = ProfileError::NoActivationRule;
        assert!(e.to_string().contains("at least one activation rule"));
    }

    #[test]
    fn profile_error_unknown_profile_display() {
        let e = ProfileError::UnknownProfile {
            name: "nope".to_string(),
            available: "work, personal".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "unknown profile 'nope' (available: work, personal)"
        );
    }

    #[test]
    fn profile_error_key_generation_display() {
        let e = ProfileError::KeyGeneration("ssh-keygen exited with code 1".to_string());
        assert_eq!(
            e.to_string(),
            "ssh key generation failed: ssh-keygen exited with code 1"
        );
    }

    #[test]
    fn profile_error_from_config_error() {
        let config_err = ConfigError::MalformedSection {
            line: 1,
            text: "oops".to_string(),
        };
        let e: ProfileError = config_err.into();
        assert!(e.to_string().contains("malformed section"));
    }

    // -----------------------------------------------------------------------
    // Send + Sync bounds and anyhow conversion
    // -----------------------------------------------------------------------

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<ConfigError>();
        assert_send_sync::<ProfileError>();
    }

    #[test]
    fn profile_error_converts_to_anyhow() {
        let e = ProfileError::NoActivationRule;
        let _anyhow_err: anyhow::Error = e.into();
    }
}
