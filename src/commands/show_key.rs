//! Command: print a profile's public key.

use anyhow::Result;

use crate::cli::{GlobalOpts, ShowKeyOpts};
use crate::config::Paths;
use crate::logging::Logger;
use crate::ssh;

/// Run the show-key command.
///
/// # Errors
///
/// Returns an error if the public key file cannot be read.
pub fn run(global: &GlobalOpts, opts: &ShowKeyOpts, log: &Logger) -> Result<()> {
    let paths = Paths::resolve(global.home.as_deref())?;
    log.debug(&format!(
        "reading {}",
        paths.ssh_dir.join(format!("{}.pub", opts.profile)).display()
    ));
    let key = ssh::public_key(&paths.ssh_dir, &opts.profile)?;
    println!("{}", key.trim_end());
    Ok(())
}
