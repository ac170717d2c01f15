use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the git profile manager.
#[derive(Parser, Debug)]
#[command(
    name = "git-profiles",
    about = "Manage git identity profiles selected via conditional includes",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Override the home directory used to locate .gitconfig, .gitconfigs and .ssh
    #[arg(long, global = true)]
    pub home: Option<std::path::PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new profile: generate its SSH key and register activation rules
    Create(CreateOpts),
    /// Append activation rules to an existing profile
    AddRules(AddRulesOpts),
    /// Print the public half of a profile's SSH key pair
    ShowKey(ShowKeyOpts),
    /// Print version information
    Version,
}

/// Options for the `create` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CreateOpts {
    /// Profile name (also names the key pair and the config fragment)
    pub profile: String,

    /// Email address for commits and the SSH key comment
    #[arg(long)]
    pub email: String,

    /// Full name for commits
    #[arg(long = "name")]
    pub user_name: String,

    /// Account name on the hosting service
    #[arg(long)]
    pub account: String,

    /// Activate the profile inside this directory (repeatable)
    #[arg(long = "gitdir")]
    pub gitdirs: Vec<String>,

    /// Activate the profile on this branch (repeatable)
    #[arg(long = "onbranch")]
    pub onbranches: Vec<String>,

    /// Activate the profile when a remote URL matches this pattern (repeatable)
    #[arg(long = "remote-url")]
    pub remote_urls: Vec<String>,
}

/// Options for the `add-rules` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct AddRulesOpts {
    /// Name of an existing profile
    pub profile: String,

    /// Activate the profile inside this directory (repeatable)
    #[arg(long = "gitdir")]
    pub gitdirs: Vec<String>,

    /// Activate the profile on this branch (repeatable)
    #[arg(long = "onbranch")]
    pub onbranches: Vec<String>,

    /// Activate the profile when a remote URL matches this pattern (repeatable)
    #[arg(long = "remote-url")]
    pub remote_urls: Vec<String>,
}

/// Options for the `show-key` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ShowKeyOpts {
    /// Name of an existing profile
    pub profile: String,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_create_minimal() {
        let cli = Cli::parse_from([
            "git-profiles",
            "create",
            "work",
            "--email",
            "a@b.com",
            "--name",
            "A B",
            "--account",
            "ghuser",
            "--gitdir",
            "~/work",
        ]);
        let Command::Create(opts) = cli.command else {
            panic!("expected Create command");
        };
        assert_eq!(opts.profile, "work");
        assert_eq!(opts.email, "a@b.com");
        assert_eq!(opts.user_name, "A B");
        assert_eq!(opts.account, "ghuser");
        assert_eq!(opts.gitdirs, vec!["~/work"]);
        assert!(opts.onbranches.is_empty());
    }

    #[test]
    fn parse_create_repeated_rules() {
        let cli = Cli::parse_from([
            "git-profiles",
            "create",
            "oss",
            "--email",
            "a@b.com",
            "--name",
            "A B",
            "--account",
            "ghuser",
            "--gitdir",
            "~/oss",
            "--gitdir",
            "~/forks",
            "--onbranch",
            "release",
            "--remote-url",
            "https://github.com/oss/**",
        ]);
        let Command::Create(opts) = cli.command else {
            panic!("expected Create command");
        };
        assert_eq!(opts.gitdirs, vec!["~/oss", "~/forks"]);
        assert_eq!(opts.onbranches, vec!["release"]);
        assert_eq!(opts.remote_urls, vec!["https://github.com/oss/**"]);
    }

    #[test]
    fn parse_create_missing_email_fails() {
        let result = Cli::try_parse_from([
            "git-profiles",
            "create",
            "work",
            "--name",
            "A B",
            "--account",
            "ghuser",
        ]);
        assert!(result.is_err(), "--email should be required");
    }

    #[test]
    fn parse_add_rules() {
        let cli = Cli::parse_from(["git-profiles", "add-rules", "work", "--onbranch", "main"]);
        let Command::AddRules(opts) = cli.command else {
            panic!("expected AddRules command");
        };
        assert_eq!(opts.profile, "work");
        assert_eq!(opts.onbranches, vec!["main"]);
    }

    #[test]
    fn parse_show_key() {
        let cli = Cli::parse_from(["git-profiles", "show-key", "work"]);
        let Command::ShowKey(opts) = cli.command else {
            panic!("expected ShowKey command");
        };
        assert_eq!(opts.profile, "work");
    }

    #[test]
    fn parse_version() {
        let cli = Cli::parse_from(["git-profiles", "version"]);
        assert!(matches!(cli.command, Command::Version));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::parse_from(["git-profiles", "-v", "show-key", "work"]);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_home_override() {
        let cli = Cli::parse_from(["git-profiles", "--home", "/tmp/fake-home", "show-key", "w"]);
        assert_eq!(
            cli.global.home,
            Some(std::path::PathBuf::from("/tmp/fake-home"))
        );
    }
}
