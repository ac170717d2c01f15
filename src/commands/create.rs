//! Command: create a profile.

use anyhow::Result;

use crate::cli::{CreateOpts, GlobalOpts};
use crate::config::Paths;
use crate::logging::Logger;
use crate::profiles::{ActivationRule, CreateRequest, ProfileStore};
use crate::ssh::{self, SshKeygen};

/// Run the create command.
///
/// # Errors
///
/// Returns an error if the rule set is empty, the profile already exists,
/// key generation fails, or the base document cannot be parsed or persisted.
pub fn run(global: &GlobalOpts, opts: &CreateOpts, log: &Logger) -> Result<()> {
    let paths = Paths::resolve(global.home.as_deref())?;
    let keygen = SshKeygen::new(paths.ssh_dir.clone());
    let store = ProfileStore::new(paths.clone(), &keygen);

    let request = CreateRequest {
        profile: opts.profile.clone(),
        user_name: opts.user_name.clone(),
        email: opts.email.clone(),
        account: opts.account.clone(),
        rules: ActivationRule::collect(&opts.gitdirs, &opts.onbranches, &opts.remote_urls),
    };

    log.stage(&format!("Creating profile {}", opts.profile));
    log.debug(&format!("base document: {}", paths.base_config.display()));
    store.create(&request)?;
    log.info(&format!("profile {} created", opts.profile));

    log.stage("Next steps");
    log.info("add the new key to your agent:");
    log.info("  eval \"$(ssh-agent -s)\"");
    log.info(&format!(
        "  ssh-add {}",
        paths.ssh_dir.join(&opts.profile).display()
    ));
    log.info("register this public key with your hosting service:");
    let key = ssh::public_key(&paths.ssh_dir, &opts.profile)?;
    log.info(key.trim_end());
    Ok(())
}
