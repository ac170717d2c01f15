use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;
mod config;
mod error;
mod exec;
mod logging;
mod profiles;
mod ssh;

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose);
    let log = logging::Logger::new();

    let result = match args.command {
        cli::Command::Create(opts) => commands::create::run(&args.global, &opts, &log),
        cli::Command::AddRules(opts) => commands::add_rules::run(&args.global, &opts, &log),
        cli::Command::ShowKey(opts) => commands::show_key::run(&args.global, &opts, &log),
        cli::Command::Version => {
            commands::version::run();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log.error(&format!("{err:#}"));
            if let Some(path) = log.log_path() {
                log.debug(&format!("full log: {}", path.display()));
            }
            ExitCode::FAILURE
        }
    }
}
