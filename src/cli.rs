use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the hookstrap bootstrapper.
#[derive(Parser, Debug)]
#[command(
    name = "hookstrap",
    about = "Idempotent pre-commit toolchain bootstrapper",
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
    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Override the home directory (ledger, version manager, shell profile)
    #[arg(long, global = true)]
    pub home: Option<std::path::PathBuf>,

    /// Override the target repository (defaults to the current directory)
    #[arg(long, global = true)]
    pub repo: Option<std::path::PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Bootstrap a repository for the given ecosystem profile
    Bootstrap(BootstrapOpts),
    /// Check prerequisite binaries and report what is missing
    Doctor,
    /// Print version information
    Version,
}

/// Options for the `bootstrap` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct BootstrapOpts {
    /// Ecosystem profile (global, golang, python, terraform, typescript)
    pub profile: String,

    /// Also install the catalog's optional tools
    #[arg(long)]
    pub with_optional: bool,
}
