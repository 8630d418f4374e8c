//! Dependency verification.

use anyhow::Result;

use super::{Context, Step, StepResult};
use crate::error::StepError;
use crate::exec::Executor;

/// Binaries every bootstrap run needs before anything else happens.
pub const REQUIRED_BINARIES: &[&str] = &["git", "curl", "tar"];

/// Return the subset of `REQUIRED_BINARIES` not found on the search path,
/// in check order. Pure check; no side effects.
#[must_use]
pub fn missing_binaries(executor: &dyn Executor) -> Vec<String> {
    REQUIRED_BINARIES
        .iter()
        .filter(|bin| !executor.which(bin))
        .map(|bin| (*bin).to_string())
        .collect()
}

/// Verify prerequisite binaries are present.
///
/// A missing binary is a hard stop: proceeding would make every downstream
/// step fail with confusing secondary errors.
#[derive(Debug)]
pub struct CheckDependencies;

impl Step for CheckDependencies {
    fn name(&self) -> &str {
        "Check dependencies"
    }

    fn fatal(&self) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<StepResult> {
        let missing = missing_binaries(ctx.executor.as_ref());
        if !missing.is_empty() {
            return Err(StepError::MissingDependencies(missing).into());
        }
        for bin in REQUIRED_BINARIES {
            ctx.log.debug(&format!("found: {bin}"));
        }

        // Advisory only: commit-message linting degrades gracefully.
        if !ctx.executor.which("commitlint") {
            ctx.log
                .warn("commitlint not found; commit-message linting will be skipped");
        }

        Ok(StepResult::Ok)
    }
}
