// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed fake home and a recording fake key
// generator so each integration test can drive the profile store against an
// isolated filesystem without invoking ssh-keygen.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use git_profiles_cli::config::Paths;
use git_profiles_cli::error::ProfileError;
use git_profiles_cli::profiles::{ActivationRule, CreateRequest};
use git_profiles_cli::ssh::KeyGenerator;

/// An isolated home directory backed by a [`tempfile::TempDir`].
///
/// Deleted automatically when dropped.
pub struct TestHome {
    pub dir: tempfile::TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp home"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Well-known locations rooted at this home.
    pub fn paths(&self) -> Paths {
        Paths::new(self.dir.path())
    }

    /// Raw text of the base document.
    pub fn base_text(&self) -> String {
        fs::read_to_string(self.paths().base_config).expect("read base document")
    }
}

/// Recording [`KeyGenerator`] that fabricates a key pair on disk so the
/// create flow (including public-key display) can complete.
pub struct FakeKeygen {
    pub ssh_dir: PathBuf,
    pub calls: RefCell<Vec<(String, String)>>,
}

impl FakeKeygen {
    pub fn new(ssh_dir: PathBuf) -> Self {
        Self {
            ssh_dir,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl KeyGenerator for FakeKeygen {
    fn generate(&self, email: &str, profile: &str) -> Result<(), ProfileError> {
        self.calls
            .borrow_mut()
            .push((email.to_string(), profile.to_string()));
        let io_err = |e: std::io::Error| ProfileError::KeyGeneration(e.to_string());
        fs::create_dir_all(&self.ssh_dir).map_err(io_err)?;
        fs::write(self.ssh_dir.join(profile), "fake private key").map_err(io_err)?;
        fs::write(
            self.ssh_dir.join(format!("{profile}.pub")),
            format!("ssh-ed25519 AAAAfake {email}\n"),
        )
        .map_err(io_err)?;
        Ok(())
    }
}

/// A minimal valid create request for `profile` with the given rules.
pub fn create_request(profile: &str, rules: Vec<ActivationRule>) -> CreateRequest {
    CreateRequest {
        profile: profile.to_string(),
        user_name: "A B".to_string(),
        email: "a@b.com".to_string(),
        account: "ghuser".to_string(),
        rules,
    }
}
