//! CLI command handlers.
//!
//! Each submodule implements one subcommand. Handlers resolve the
//! environment (home, repository, shell), build the step [`Context`], and
//! translate pipeline outcomes into the process exit contract: any
//! unrecoverable failure or failed check surfaces as an `Err` from the
//! handler, which the binary maps to exit code 1.
//!
//! [`Context`]: crate::steps::Context

pub mod bootstrap;
pub mod doctor;

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::error::PlatformError;

/// The user's home directory, honouring the `--home` override.
pub(crate) fn resolve_home(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(home) = &global.home {
        return Ok(home.clone());
    }
    std::env::home_dir().ok_or_else(|| {
        PlatformError::DetectionFailed("home directory could not be determined".to_string()).into()
    })
}

/// The target repository, honouring the `--repo` override. Defaults to the
/// current working directory.
pub(crate) fn resolve_repo(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(repo) = &global.repo {
        return Ok(repo.clone());
    }
    Ok(std::env::current_dir()?)
}
