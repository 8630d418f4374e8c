//! Hook installation.
//!
//! Two layers: hook scripts go into the Git template directory so every
//! future `git init`/`git clone` picks them up, and `pre-commit install`
//! wires the hooks into the target repository directly when it is a Git
//! repository and the hook runner is on the path.

use anyhow::Result;

use super::{Context, Step, StepResult};
use crate::config::templates::{HOOK_COMMIT_MSG, HOOK_PRE_COMMIT};
use crate::resources::{HookInstall, HookScriptResource};

/// Hook-runner binary this step drives.
const HOOK_RUNNER: &str = "pre-commit";

fn hook_scripts(ctx: &Context) -> Vec<HookScriptResource> {
    let hooks_dir = ctx.hook_template_dir().join("hooks");
    vec![
        HookScriptResource::new(hooks_dir.join("pre-commit"), HOOK_PRE_COMMIT.body),
        HookScriptResource::new(hooks_dir.join("commit-msg"), HOOK_COMMIT_MSG.body),
    ]
}

/// Install hook scripts into the Git template directory and activate them in
/// the target repository.
#[derive(Debug)]
pub struct InstallHooks;

impl Step for InstallHooks {
    fn name(&self) -> &str {
        "Install hooks"
    }

    fn run(&self, ctx: &Context) -> Result<StepResult> {
        let template_dir = ctx.hook_template_dir();

        if ctx.dry_run {
            for script in hook_scripts(ctx) {
                ctx.log.dry_run(&format!(
                    "would install {} into {}",
                    script.description(),
                    template_dir.display()
                ));
            }
            ctx.log.dry_run(&format!(
                "would set init.templatedir to {}",
                template_dir.display()
            ));
            ctx.log
                .dry_run(&format!("would run {HOOK_RUNNER} install in the repository"));
            return Ok(StepResult::DryRun);
        }

        for script in hook_scripts(ctx) {
            match script.install()? {
                HookInstall::Applied => ctx
                    .log
                    .info(&format!("installed hook: {}", script.description())),
                HookInstall::AlreadyCorrect => ctx
                    .log
                    .debug(&format!("hook up to date: {}", script.description())),
            }
        }

        ctx.executor.run(
            "git",
            &[
                "config",
                "--global",
                "init.templatedir",
                &template_dir.to_string_lossy(),
            ],
        )?;

        // Direct activation needs both a Git repository and the runner.
        if !ctx.repo.join(".git").exists() {
            return Ok(StepResult::Skipped(format!(
                "{} is not a Git repository; hooks will apply to future clones",
                ctx.repo.display()
            )));
        }
        if !ctx.executor.which(HOOK_RUNNER) {
            return Ok(StepResult::Skipped(format!(
                "{HOOK_RUNNER} not on PATH; restart your terminal and re-run"
            )));
        }

        ctx.executor.run_in(
            &ctx.repo,
            HOOK_RUNNER,
            &["install", "--install-hooks", "--hook-type", "commit-msg", "--hook-type", "pre-commit"],
        )?;
        ctx.log.info("hooks activated in repository");
        Ok(StepResult::Ok)
    }
}
