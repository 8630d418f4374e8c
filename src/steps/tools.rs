//! Toolchain installation for the selected profile.

use anyhow::Result;

use super::{Context, Step, StepResult};
use crate::resources::{InstallOutcome, ToolVersionResource};

/// Install every catalog tool the selected profile needs.
///
/// Optional tools are skipped unless explicitly requested. A single tool
/// failing does not stop the rest; failures are collected and surfaced as a
/// skip reason so the remaining pipeline still runs.
#[derive(Debug)]
pub struct InstallTools;

impl Step for InstallTools {
    fn name(&self) -> &str {
        "Install tools"
    }

    fn run(&self, ctx: &Context) -> Result<StepResult> {
        let ledger = ctx.ledger();
        let mut failed: Vec<String> = Vec::new();

        for spec in ctx.catalog.tools_for(ctx.profile) {
            if spec.optional && !ctx.with_optional {
                ctx.log
                    .debug(&format!("skipping optional tool: {}", spec.name));
                continue;
            }

            let resource = ToolVersionResource::new(spec, ctx.executor.as_ref());
            if ctx.dry_run {
                ctx.log
                    .dry_run(&format!("would ensure {}", resource.description()));
                continue;
            }

            match resource.ensure() {
                Ok(InstallOutcome::Installed) => {
                    ctx.log.info(&format!("installed {}", resource.description()));
                    ledger.record(&spec.name, &spec.version)?;
                }
                Ok(InstallOutcome::AlreadyPresent) => {
                    ctx.log
                        .debug(&format!("already installed: {}", resource.description()));
                    ledger.record(&spec.name, &spec.version)?;
                }
                Err(e) => {
                    ctx.log
                        .warn(&format!("{} failed: {e:#}", resource.description()));
                    failed.push(spec.name.clone());
                }
            }
        }

        if ctx.dry_run {
            return Ok(StepResult::DryRun);
        }
        if failed.is_empty() {
            Ok(StepResult::Ok)
        } else {
            Ok(StepResult::Skipped(format!(
                "{} tool(s) failed to install: {}",
                failed.len(),
                failed.join(", ")
            )))
        }
    }
}
