//! SSH key-pair generation and public-key display.
//!
//! Key generation is delegated to the external `ssh-keygen` tool behind the
//! [`KeyGenerator`] trait so the profile store can be exercised in tests
//! without touching a real key store.

use anyhow::{Context as _, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ProfileError;
use crate::exec;

/// Hard wall-clock bound on one ssh-keygen invocation. The child is killed
/// on expiry; there is no retry.
pub const KEYGEN_TIMEOUT: Duration = Duration::from_secs(60);

/// Key algorithm passed to ssh-keygen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyAlgorithm {
    #[default]
    Ed25519,
}

impl KeyAlgorithm {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ed25519 => "ed25519",
        }
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// External key-generation capability consumed by the profile store.
pub trait KeyGenerator {
    /// Generate a key pair for `profile`, commented with `email`, at the
    /// generator's fixed location for that profile name.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::KeyGeneration`] on non-zero exit or timeout,
    /// with the tool's diagnostic text attached.
    fn generate(&self, email: &str, profile: &str) -> Result<(), ProfileError>;
}

/// Production [`KeyGenerator`] shelling out to `ssh-keygen`.
///
/// Stdout and stdin stay connected to the terminal so ssh-keygen can prompt
/// for a passphrase interactively.
#[derive(Debug)]
pub struct SshKeygen {
    ssh_dir: PathBuf,
    algorithm: KeyAlgorithm,
    timeout: Duration,
}

impl SshKeygen {
    #[must_use]
    pub fn new(ssh_dir: PathBuf) -> Self {
        Self {
            ssh_dir,
            algorithm: KeyAlgorithm::default(),
            timeout: KEYGEN_TIMEOUT,
        }
    }

    /// Location of the private key for `profile`.
    #[must_use]
    pub fn key_path(&self, profile: &str) -> PathBuf {
        self.ssh_dir.join(profile)
    }
}

impl KeyGenerator for SshKeygen {
    fn generate(&self, email: &str, profile: &str) -> Result<(), ProfileError> {
        let key_path = self.key_path(profile);
        let key_arg = key_path.display().to_string();
        let result = exec::run_with_timeout(
            "ssh-keygen",
            &["-t", self.algorithm.as_str(), "-C", email, "-f", key_arg.as_str()],
            self.timeout,
        )
        .map_err(|e| ProfileError::KeyGeneration(e.to_string()))?;
        if !result.success {
            return Err(ProfileError::KeyGeneration(format!(
                "ssh-keygen exited with code {}: {}",
                result.code.unwrap_or(-1),
                result.stderr.trim()
            )));
        }
        Ok(())
    }
}

/// Read the public half of a profile's key pair for display.
///
/// # Errors
///
/// Returns an error if `<ssh_dir>/<profile>.pub` cannot be read.
pub fn public_key(ssh_dir: &Path, profile: &str) -> Result<String> {
    let path = ssh_dir.join(format!("{profile}.pub"));
    std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn key_algorithm_display() {
        assert_eq!(KeyAlgorithm::Ed25519.to_string(), "ed25519");
        assert_eq!(KeyAlgorithm::default(), KeyAlgorithm::Ed25519);
    }

    #[test]
    fn key_path_is_profile_named() {
        let keygen = SshKeygen::new(PathBuf::from("/home/u/.ssh"));
        assert_eq!(keygen.key_path("work"), PathBuf::from("/home/u/.ssh/work"));
    }

    #[test]
    fn public_key_reads_pub_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("work.pub"), "ssh-ed25519 AAAA a@b.com\n").unwrap();
        let key = public_key(dir.path(), "work").unwrap();
        assert_eq!(key.trim_end(), "ssh-ed25519 AAAA a@b.com");
    }

    #[test]
    fn public_key_missing_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(public_key(dir.path(), "absent").is_err());
    }
}
