//! The `bootstrap` command: run the full pipeline for one profile.

use std::sync::Arc;

use anyhow::Result;

use crate::cli::{BootstrapOpts, GlobalOpts};
use crate::config::{Catalog, Profile};
use crate::error::StepError;
use crate::exec::SystemExecutor;
use crate::logging::{Log, Logger};
use crate::platform::Platform;
use crate::steps::{self, Context};

use super::{resolve_home, resolve_repo};

/// Build the step context from CLI options and the environment.
fn build_context(
    global: &GlobalOpts,
    opts: &BootstrapOpts,
    log: &Arc<Logger>,
) -> Result<Context> {
    let profile: Profile = opts.profile.parse()?;
    Ok(Context {
        profile,
        catalog: Catalog::load()?,
        home: resolve_home(global)?,
        repo: resolve_repo(global)?,
        shell_program: std::env::var("SHELL").unwrap_or_default(),
        platform: Platform::detect()?,
        executor: Arc::new(SystemExecutor),
        log: Arc::clone(log) as Arc<dyn Log>,
        dry_run: global.dry_run,
        with_optional: opts.with_optional,
    })
}

/// Run the bootstrap pipeline.
///
/// The summary banner is printed even when a fatal step aborts the run, so
/// the user always sees how far the pipeline got.
///
/// # Errors
///
/// Returns an error when a fatal step fails or when any step recorded a
/// failure; the binary maps both to exit code 1.
pub fn run(global: &GlobalOpts, opts: &BootstrapOpts, log: &Arc<Logger>) -> Result<()> {
    let ctx = build_context(global, opts, log)?;

    log.info(&format!(
        "bootstrapping profile '{}' in {}",
        ctx.profile,
        ctx.repo.display()
    ));
    if ctx.dry_run {
        log.dry_run("no changes will be applied");
    }

    let result = steps::run_pipeline(&steps::pipeline(), &ctx);
    log.print_summary();

    result?;
    if log.has_failures() {
        return Err(StepError::ExecutionFailed {
            step: "bootstrap".to_string(),
            reason: format!("{} step(s) failed", log.failure_count()),
        }
        .into());
    }
    Ok(())
}
