use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use hookstrap_cli::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose);
    let log = Arc::new(logging::Logger::new());

    match args.command {
        cli::Command::Bootstrap(opts) => commands::bootstrap::run(&args.global, &opts, &log),
        cli::Command::Doctor => commands::doctor::run(&args.global, &log),
        cli::Command::Version => {
            let version = option_env!("HOOKSTRAP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
            println!("hookstrap {version}");
            Ok(())
        }
    }
}
