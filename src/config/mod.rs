//! Well-known file locations and the gitconfig document model.

pub mod gitconfig;

use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

/// The fixed locations this tool reads and writes, resolved once at startup
/// and threaded into the profile store explicitly.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Base gitconfig holding every profile's includeIf rules (`~/.gitconfig`).
    pub base_config: PathBuf,
    /// Directory of per-profile config fragments (`~/.gitconfigs`).
    pub profiles_dir: PathBuf,
    /// Directory of SSH key pairs (`~/.ssh`).
    pub ssh_dir: PathBuf,
}

impl Paths {
    /// Derive all locations from a home directory.
    #[must_use]
    pub fn new(home: &Path) -> Self {
        Self {
            base_config: home.join(".gitconfig"),
            profiles_dir: home.join(".gitconfigs"),
            ssh_dir: home.join(".ssh"),
        }
    }

    /// Resolve from an explicit `--home` override or the current user's home.
    ///
    /// # Errors
    ///
    /// Returns an error if no override is given and the home directory cannot
    /// be determined.
    pub fn resolve(home_override: Option<&Path>) -> Result<Self> {
        let home = match home_override {
            Some(home) => home.to_path_buf(),
            None => dirs::home_dir().context("cannot determine home directory")?,
        };
        Ok(Self::new(&home))
    }

    /// Path of the config fragment for `profile`: the profile name prefixed
    /// with a dot, under the profiles directory.
    #[must_use]
    pub fn profile_config(&self, profile: &str) -> PathBuf {
        self.profiles_dir.join(format!(".{profile}"))
    }
}

/// Expand a leading tilde to the current user's home directory.
///
/// Anything else (including mid-path tildes) passes through unchanged.
#[must_use]
pub fn expand_tilde(raw: &str) -> PathBuf {
    if raw == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = raw.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(raw)
}
