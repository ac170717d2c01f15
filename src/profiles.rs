//! Profile store: creates profiles and appends activation rules.
//!
//! The base document (`~/.gitconfig`) is the single source of truth for
//! which profiles exist: a profile is "registered" exactly when an include
//! group targets its config fragment. Validation of profile names happens
//! against that live map at call time; there is no separate registry.

use std::fs;
use std::path::Path;

use crate::config::Paths;
use crate::config::gitconfig::{GitConfig, IncludeRule};
use crate::error::{ConfigError, ProfileError};
use crate::ssh::KeyGenerator;

/// One condition under which a profile activates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationRule {
    /// Repository lives under this directory glob.
    GitDir(String),
    /// Checked-out branch matches this name.
    OnBranch(String),
    /// A remote URL matches this pattern.
    RemoteUrl(String),
}

impl ActivationRule {
    /// Collect CLI rule options into one ordered list: directories first,
    /// then branches, then remote URL patterns.
    #[must_use]
    pub fn collect(gitdirs: &[String], onbranches: &[String], remote_urls: &[String]) -> Vec<Self> {
        let mut rules = Vec::new();
        rules.extend(gitdirs.iter().cloned().map(Self::GitDir));
        rules.extend(onbranches.iter().cloned().map(Self::OnBranch));
        rules.extend(remote_urls.iter().cloned().map(Self::RemoteUrl));
        rules
    }

    fn to_include_rule(&self) -> IncludeRule {
        match self {
            Self::GitDir(dir) => {
                // git only matches a directory glob that ends with a slash
                let mut dir = dir.clone();
                if !dir.ends_with('/') {
                    dir.push('/');
                }
                IncludeRule::new("gitdir", dir)
            }
            Self::OnBranch(branch) => IncludeRule::new("onbranch", branch.clone()),
            Self::RemoteUrl(url) => IncludeRule::new("hasconfig:remote.*.url", url.clone()),
        }
    }
}

/// Everything needed to create one profile.
#[derive(Debug, Clone)]
pub struct CreateRequest {
    /// Profile name: names the key pair and the config fragment.
    pub profile: String,
    /// Full name for commits.
    pub user_name: String,
    /// Email for commits and the key comment.
    pub email: String,
    /// Account name on the hosting service.
    pub account: String,
    /// Activation conditions; must be non-empty.
    pub rules: Vec<ActivationRule>,
}

/// Orchestrates profile mutations against the base document and the
/// per-profile fragments.
pub struct ProfileStore<'a> {
    paths: Paths,
    keygen: &'a dyn KeyGenerator,
}

impl<'a> ProfileStore<'a> {
    #[must_use]
    pub fn new(paths: Paths, keygen: &'a dyn KeyGenerator) -> Self {
        Self { paths, keygen }
    }

    /// Create a profile: generate its key pair, register its activation
    /// rules in the base document, and write its config fragment.
    ///
    /// There is no rollback: a failure after key generation leaves the key
    /// pair on disk with no registered profile. Re-running `create` for the
    /// same name then fails only if the fragment was written; otherwise
    /// ssh-keygen itself refuses to overwrite the existing key.
    ///
    /// # Errors
    ///
    /// - [`ProfileError::NoActivationRule`] if `request.rules` is empty
    ///   (checked before any filesystem mutation)
    /// - [`ProfileError::AlreadyExists`] if the fragment path exists
    ///   (checked before key generation)
    /// - [`ProfileError::KeyGeneration`] from the key generator
    /// - [`ProfileError::Config`] if the base document is malformed or
    ///   either document cannot be read or written
    pub fn create(&self, request: &CreateRequest) -> Result<(), ProfileError> {
        if request.rules.is_empty() {
            return Err(ProfileError::NoActivationRule);
        }
        let fragment = self.paths.profile_config(&request.profile);
        if fragment.exists() {
            return Err(ProfileError::AlreadyExists(request.profile.clone()));
        }

        self.keygen.generate(&request.email, &request.profile)?;

        let mut base = GitConfig::load(&self.paths.base_config)?;
        let rules = base.include_rules_mut(&fragment);
        // The fragment does not exist, so any rules already registered for
        // its path are stale leftovers; the new rule set replaces them.
        rules.clear();
        for rule in &request.rules {
            rules.push(rule.to_include_rule());
        }
        base.write(&self.paths.base_config)?;

        create_dir(&self.paths.profiles_dir)?;
        profile_document(request).write(&fragment)?;
        Ok(())
    }

    /// Append activation rules to an existing profile. Existing rules are
    /// never replaced, reordered or deduplicated.
    ///
    /// # Errors
    ///
    /// - [`ProfileError::NoActivationRule`] if `rules` is empty
    /// - [`ProfileError::UnknownProfile`] if the profile's fragment path is
    ///   not registered in the base document
    /// - [`ProfileError::Config`] on parse or I/O failures
    pub fn add_rules(&self, profile: &str, rules: &[ActivationRule]) -> Result<(), ProfileError> {
        if rules.is_empty() {
            return Err(ProfileError::NoActivationRule);
        }
        let mut base = GitConfig::load(&self.paths.base_config)?;
        let fragment = self.paths.profile_config(profile);
        if !base.has_include(&fragment) {
            return Err(ProfileError::UnknownProfile {
                name: profile.to_string(),
                available: profile_names(&base).join(", "),
            });
        }
        let list = base.include_rules_mut(&fragment);
        for rule in rules {
            list.push(rule.to_include_rule());
        }
        base.write(&self.paths.base_config)?;
        Ok(())
    }

    /// Names of all registered profiles, in base-document order.
    ///
    /// # Errors
    ///
    /// Returns an error if the base document cannot be read or parsed.
    pub fn profile_names(&self) -> Result<Vec<String>, ProfileError> {
        let base = GitConfig::load(&self.paths.base_config)?;
        Ok(profile_names(&base))
    }
}

/// Profile names derived from the base document's include targets: the file
/// name with its leading dot stripped.
fn profile_names(base: &GitConfig) -> Vec<String> {
    base.include_paths()
        .filter_map(|path| {
            let name = path.file_name()?.to_string_lossy().into_owned();
            Some(name.trim_start_matches('.').to_string())
        })
        .collect()
}

/// Build the per-profile config fragment: identity, hosting-service account,
/// and the SSH command override pointing at the profile's key.
#[must_use]
pub fn profile_document(request: &CreateRequest) -> GitConfig {
    let mut doc = GitConfig::default();
    doc.set("user", "name", &request.user_name);
    doc.set("user", "email", &request.email);
    doc.set("github", "user", &request.account);
    doc.set(
        "core",
        "sshCommand",
        &format!("ssh -i ~/.ssh/{}", request.profile),
    );
    doc
}

fn create_dir(dir: &Path) -> Result<(), ProfileError> {
    fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    Ok(())
}
