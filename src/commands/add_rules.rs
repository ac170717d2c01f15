//! Command: append activation rules to an existing profile.

use anyhow::Result;

use crate::cli::{AddRulesOpts, GlobalOpts};
use crate::config::Paths;
use crate::logging::Logger;
use crate::profiles::{ActivationRule, ProfileStore};
use crate::ssh::SshKeygen;

/// Run the add-rules command.
///
/// # Errors
///
/// Returns an error if the rule set is empty, the profile is not registered
/// in the base document, or the document cannot be parsed or persisted.
pub fn run(global: &GlobalOpts, opts: &AddRulesOpts, log: &Logger) -> Result<()> {
    let paths = Paths::resolve(global.home.as_deref())?;
    let keygen = SshKeygen::new(paths.ssh_dir.clone());
    let store = ProfileStore::new(paths, &keygen);

    let rules = ActivationRule::collect(&opts.gitdirs, &opts.onbranches, &opts.remote_urls);
    let count = rules.len();
    store.add_rules(&opts.profile, &rules)?;
    log.info(&format!(
        "added {count} activation rule(s) to profile {}",
        opts.profile
    ));
    Ok(())
}
