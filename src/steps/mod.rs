//! Named pipeline steps that orchestrate resource changes.
//!
//! The bootstrap sequence is a small pipeline of named steps executed
//! sequentially in insertion order. Each step returns a structured result;
//! the driver records every outcome in the logger so the final summary shows
//! the whole run in one place. A failed *fatal* step (missing dependencies,
//! broken version-manager setup) aborts the remaining pipeline; everything
//! else fails soft.
pub mod configs;
mod context;
pub mod deps;
pub mod hooks;
pub mod run_checks;
pub mod tools;
pub mod version_manager;

pub use context::Context;

use anyhow::Result;

use crate::logging::StepStatus;

/// Result of a successfully handled step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    /// The step completed and made (or confirmed) its changes.
    Ok,
    /// The step had nothing to do, with a reason.
    Skipped(String),
    /// Dry-run mode: actions were logged, nothing was applied.
    DryRun,
}

/// A named, executable pipeline step.
pub trait Step: Send + Sync {
    /// Human-readable step name.
    fn name(&self) -> &str;

    /// Whether a failure of this step aborts the remaining pipeline.
    ///
    /// Defaults to `false` (fail-soft).
    fn fatal(&self) -> bool {
        false
    }

    /// Whether this step applies to the current profile/environment.
    fn should_run(&self, ctx: &Context) -> bool {
        let _ = ctx;
        true
    }

    /// Execute the step.
    ///
    /// # Errors
    ///
    /// Returns an error if the step fails, such as when external commands
    /// fail or file operations are not permitted.
    fn run(&self, ctx: &Context) -> Result<StepResult>;
}

/// The complete bootstrap pipeline, in execution order.
#[must_use]
pub fn pipeline() -> Vec<Box<dyn Step>> {
    vec![
        Box::new(deps::CheckDependencies),
        Box::new(version_manager::BootstrapVersionManager),
        Box::new(tools::InstallTools),
        Box::new(configs::EmitConfigs),
        Box::new(hooks::InstallHooks),
        Box::new(run_checks::RunChecks),
    ]
}

/// Execute a step, recording the result in the logger.
///
/// Returns `false` if the step failed.
#[must_use]
pub fn execute(step: &dyn Step, ctx: &Context) -> bool {
    if !step.should_run(ctx) {
        ctx.log
            .debug(&format!("skipping step: {} (not applicable)", step.name()));
        ctx.log
            .record_step(step.name(), StepStatus::NotApplicable, None);
        return true;
    }

    ctx.log.stage(step.name());

    match step.run(ctx) {
        Ok(StepResult::Ok) => {
            ctx.log.record_step(step.name(), StepStatus::Ok, None);
            true
        }
        Ok(StepResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log
                .record_step(step.name(), StepStatus::Skipped, Some(&reason));
            true
        }
        Ok(StepResult::DryRun) => {
            ctx.log.record_step(step.name(), StepStatus::DryRun, None);
            true
        }
        Err(e) => {
            ctx.log.error(&format!("{}: {e:#}", step.name()));
            ctx.log
                .record_step(step.name(), StepStatus::Failed, Some(&format!("{e:#}")));
            false
        }
    }
}

/// Run the pipeline sequentially, aborting after a failed fatal step.
///
/// Non-fatal failures are recorded and the remaining steps still run, so the
/// summary surfaces as much as possible in one pass.
///
/// # Errors
///
/// Returns an error if a fatal step failed. Non-fatal failures are reported
/// through the logger's failure count instead.
pub fn run_pipeline(steps: &[Box<dyn Step>], ctx: &Context) -> Result<()> {
    for step in steps {
        if !execute(step.as_ref(), ctx) && step.fatal() {
            anyhow::bail!("aborting: step '{}' failed", step.name());
        }
    }
    Ok(())
}
