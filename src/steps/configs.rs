//! Configuration emission.

use anyhow::Result;

use super::{Context, Step, StepResult};
use crate::config::templates::artifacts;
use crate::config::Profile;
use crate::resources::{ConfigFileResource, EmitStatus};

/// Extract `major.minor` from `python3 --version` output ("Python 3.11.9").
fn parse_python_minor(output: &str) -> Option<String> {
    let version = output.trim().strip_prefix("Python")?.trim();
    let mut parts = version.split('.');
    match (parts.next(), parts.next()) {
        (Some(major), Some(minor)) => Some(format!("{major}.{minor}")),
        _ => None,
    }
}

/// `major.minor` of the Python the hooks will run under.
///
/// Asks the interpreter first; if `python3` is unavailable or prints
/// something unparseable, falls back to the catalog's pinned version.
fn python_minor_version(ctx: &Context) -> String {
    ctx.executor
        .run_unchecked("python3", &["--version"])
        .ok()
        .and_then(|result| {
            // Some interpreters print the banner on stderr.
            parse_python_minor(&result.stdout).or_else(|| parse_python_minor(&result.stderr))
        })
        .unwrap_or_else(|| {
            let pinned = ctx
                .catalog
                .tool("python")
                .map_or("3.12.7", |spec| spec.version.as_str());
            parse_python_minor(&format!("Python {pinned}")).unwrap_or_else(|| pinned.to_string())
        })
}

fn substitutions(ctx: &Context) -> Vec<(&'static str, String)> {
    match ctx.profile {
        Profile::Python => vec![("python_version", python_minor_version(ctx))],
        _ => Vec::new(),
    }
}

/// Emit the profile's configuration files into the repository.
///
/// Strictly create-only: every pre-existing target is skipped unread, each
/// artifact independently of the others.
#[derive(Debug)]
pub struct EmitConfigs;

impl Step for EmitConfigs {
    fn name(&self) -> &str {
        "Emit configuration"
    }

    fn run(&self, ctx: &Context) -> Result<StepResult> {
        let substitutions = substitutions(ctx);
        let pairs: Vec<(&str, &str)> = substitutions
            .iter()
            .map(|(slot, value)| (*slot, value.as_str()))
            .collect();

        let mut created = 0_usize;
        let mut skipped = 0_usize;
        for artifact in artifacts(ctx.profile) {
            let contents = artifact.template.render(&pairs)?;
            let resource = ConfigFileResource::new(ctx.repo.join(artifact.target), contents);

            if ctx.dry_run {
                if resource.exists() {
                    ctx.log.dry_run(&format!(
                        "would skip {} (already exists)",
                        resource.description()
                    ));
                } else {
                    ctx.log
                        .dry_run(&format!("would create {}", resource.description()));
                }
                continue;
            }

            match resource.emit()? {
                EmitStatus::Created => {
                    ctx.log.info(&format!("created {}", resource.description()));
                    created += 1;
                }
                EmitStatus::Skipped => {
                    ctx.log.info(&format!(
                        "kept existing {} (never overwritten)",
                        resource.description()
                    ));
                    skipped += 1;
                }
            }
        }

        if ctx.dry_run {
            return Ok(StepResult::DryRun);
        }
        ctx.log
            .debug(&format!("{created} file(s) created, {skipped} kept"));
        Ok(StepResult::Ok)
    }
}
