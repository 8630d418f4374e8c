//! Hook execution against the repository.

use anyhow::Result;

use super::{Context, Step, StepResult};
use crate::error::StepError;

/// Run every profile check across the whole repository and aggregate the
/// results.
///
/// Checks run through the hook runner one id at a time so each gets its own
/// pass/fail line in the output; a failing check never stops the remaining
/// ones. Any failure turns into an aggregate error after the full sweep.
#[derive(Debug)]
pub struct RunChecks;

impl Step for RunChecks {
    fn name(&self) -> &str {
        "Run checks"
    }

    // Nothing to verify outside a Git repository, and nothing to run the
    // checks with when the runner is absent.
    fn should_run(&self, ctx: &Context) -> bool {
        ctx.repo.join(".git").exists() && ctx.executor.which("pre-commit")
    }

    fn run(&self, ctx: &Context) -> Result<StepResult> {
        let checks = ctx.profile.check_ids();

        if ctx.dry_run {
            ctx.log.dry_run(&format!(
                "would run {} check(s): {}",
                checks.len(),
                checks.join(", ")
            ));
            return Ok(StepResult::DryRun);
        }

        let mut failed: Vec<String> = Vec::new();
        for &id in checks {
            let result =
                ctx.executor
                    .run_unchecked_in(&ctx.repo, "pre-commit", &["run", id, "--all-files"]);
            match result {
                Ok(r) if r.success => ctx.log.info(&format!("check passed: {id}")),
                Ok(r) => {
                    ctx.log.warn(&format!(
                        "check failed: {id}\n{}",
                        r.stdout.trim_end()
                    ));
                    failed.push(id.to_string());
                }
                Err(e) => {
                    ctx.log.warn(&format!("check failed to run: {id}: {e:#}"));
                    failed.push(id.to_string());
                }
            }
        }

        if failed.is_empty() {
            ctx.log
                .info(&format!("all {} check(s) passed", checks.len()));
            Ok(StepResult::Ok)
        } else {
            Err(StepError::ChecksFailed(failed).into())
        }
    }
}
