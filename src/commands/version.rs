//! Command: print version information.

/// Print the git-profiles version to stdout.
pub fn run() {
    let version = option_env!("GIT_PROFILES_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    println!("git-profiles {version}");
}
