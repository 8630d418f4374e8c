//! Version-manager bootstrap.
//!
//! Guarantees a working installation of the pinned version manager before
//! any toolchain is installed. Idempotency is achieved by destruction: any
//! pre-existing installation directory is removed unconditionally before
//! reinstalling, which trades a slower always-reinstall cost for never
//! needing version-skew detection between incompatible releases.

use std::io::Write as _;
use std::path::Path;

use anyhow::{Context as _, Result, bail};

use super::{Context, Step, StepResult};
use crate::config::InstallMethod;
use crate::error::ResourceError;
use crate::platform::Shell;
use crate::resources::{BlockStatus, ShellProfile};

/// Activation lines appended (marker-guarded) to the shell startup file.
fn activation_lines(install_dir: &Path, shell: Shell) -> Vec<String> {
    let dir = install_dir.display();
    let mut lines = vec![
        format!("export ASDF_DIR=\"{dir}\""),
        format!("export PATH=\"{dir}/bin:{dir}/shims:$PATH\""),
        format!("[ -f \"{dir}/asdf.sh\" ] && . \"{dir}/asdf.sh\""),
    ];
    match shell {
        Shell::Bash => lines.push(format!(
            "[ -f \"{dir}/completions/asdf.bash\" ] && . \"{dir}/completions/asdf.bash\""
        )),
        Shell::Zsh => lines.push(format!("fpath=(\"{dir}/completions\" $fpath)")),
    }
    lines
}

/// Download `url` into memory.
fn download(url: &str) -> Result<Vec<u8>, ResourceError> {
    let err = |message: String| ResourceError::Download {
        url: url.to_string(),
        message,
    };
    let mut response = ureq::get(url).call().map_err(|e| err(e.to_string()))?;
    response
        .body_mut()
        .read_to_vec()
        .map_err(|e| err(e.to_string()))
}

fn install(ctx: &Context) -> Result<()> {
    let spec = &ctx.catalog.version_manager;
    let install_dir = ctx.version_manager_dir();

    // Idempotency via destruction.
    if install_dir.exists() {
        ctx.log.info(&format!(
            "removing existing installation: {}",
            install_dir.display()
        ));
        std::fs::remove_dir_all(&install_dir)
            .with_context(|| format!("removing {}", install_dir.display()))?;
    }

    match spec.method {
        InstallMethod::Git => {
            ctx.log
                .info(&format!("cloning {} at {}", spec.repo, spec.git_ref));
            ctx.executor.run(
                "git",
                &[
                    "clone",
                    "--depth",
                    "1",
                    "--branch",
                    &spec.git_ref,
                    &spec.repo,
                    &install_dir.to_string_lossy(),
                ],
            )?;
        }
        InstallMethod::Archive => {
            let url = spec.archive_url(ctx.platform);
            ctx.log.info(&format!("downloading {url}"));
            let bytes = download(&url)?;

            std::fs::create_dir_all(install_dir.join("bin"))
                .with_context(|| format!("creating {}", install_dir.display()))?;
            let mut archive =
                tempfile::NamedTempFile::new().context("creating temporary archive file")?;
            archive
                .write_all(&bytes)
                .context("writing temporary archive file")?;
            archive.flush().context("flushing temporary archive file")?;
            ctx.executor.run(
                "tar",
                &[
                    "-xzf",
                    &archive.path().to_string_lossy(),
                    "-C",
                    &install_dir.join("bin").to_string_lossy(),
                ],
            )?;
        }
    }
    Ok(())
}

fn verify(ctx: &Context) -> Result<()> {
    let spec = &ctx.catalog.version_manager;
    let install_dir = ctx.version_manager_dir();
    let resolvable = ctx.executor.which(&spec.name)
        || install_dir.join("asdf.sh").exists()
        || install_dir.join("bin").join(&spec.name).exists();
    if !resolvable {
        bail!(
            "{} is not resolvable after installation; restart your terminal and re-run",
            spec.name
        );
    }
    Ok(())
}

/// Install the version manager, wire shell activation, and verify.
#[derive(Debug)]
pub struct BootstrapVersionManager;

impl Step for BootstrapVersionManager {
    fn name(&self) -> &str {
        "Bootstrap version manager"
    }

    // Shell environment mutation is unsafe to retry blindly; any failure
    // here is terminal for the run.
    fn fatal(&self) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<StepResult> {
        let spec = &ctx.catalog.version_manager;
        // Unsupported shells fail before anything is touched.
        let shell = ctx.shell()?;
        let install_dir = ctx.version_manager_dir();
        let startup = shell.startup_file(&ctx.home);

        if ctx.dry_run {
            ctx.log.dry_run(&format!(
                "would reinstall {} {} into {}",
                spec.name,
                spec.version,
                install_dir.display()
            ));
            ctx.log.dry_run(&format!(
                "would ensure activation block in {}",
                startup.display()
            ));
            return Ok(StepResult::DryRun);
        }

        install(ctx)?;

        let profile = ShellProfile::new(startup);
        match profile.ensure_block(&activation_lines(&install_dir, shell))? {
            BlockStatus::Appended => ctx.log.info(&format!(
                "added activation block to {}",
                profile.path().display()
            )),
            BlockStatus::AlreadyPresent => ctx.log.debug(&format!(
                "activation block already present in {}",
                profile.path().display()
            )),
        }

        verify(ctx)?;
        ctx.log
            .info(&format!("{} {} ready", spec.name, spec.version));
        Ok(StepResult::Ok)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::Profile;
    use crate::exec::test_helpers::MockExecutor;
    use crate::resources::shell_profile::MARKER_BEGIN;
    use crate::steps::test_helpers::{make_context, make_context_with};
    use std::sync::Arc;

    #[test]
    fn unsupported_shell_fails_before_any_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = make_context(Profile::Global, dir.path(), dir.path());
        ctx.shell_program = "/usr/bin/fish".to_string();

        let err = BootstrapVersionManager.run(&ctx).unwrap_err();
        assert!(err.to_string().contains("fish"));
        assert!(
            !ctx.version_manager_dir().exists(),
            "no directory may be created on shell failure"
        );
    }

    #[test]
    fn dry_run_mutates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = make_context(Profile::Global, dir.path(), dir.path());
        ctx.dry_run = true;

        let result = BootstrapVersionManager.run(&ctx).unwrap();
        assert_eq!(result, StepResult::DryRun);
        assert!(!ctx.version_manager_dir().exists());
        assert!(!dir.path().join(".bashrc").exists());
    }

    #[test]
    fn existing_installation_is_removed_before_reinstall() {
        let dir = tempfile::tempdir().unwrap();
        // Git clone succeeds but creates nothing (mock); verification is
        // satisfied via `which`.
        let executor =
            Arc::new(MockExecutor::with_responses(vec![(true, String::new())]).with_which(true));
        let ctx = make_context_with(Profile::Global, dir.path(), dir.path(), executor);

        let stale = ctx.version_manager_dir().join("stale-file");
        std::fs::create_dir_all(ctx.version_manager_dir()).unwrap();
        std::fs::write(&stale, "old release").unwrap();

        BootstrapVersionManager.run(&ctx).unwrap();
        assert!(!stale.exists(), "pre-existing installation must be removed");
    }

    #[test]
    fn activation_block_is_appended_and_guarded() {
        let dir = tempfile::tempdir().unwrap();
        let executor = Arc::new(
            MockExecutor::with_responses(vec![
                (true, String::new()), // first clone
                (true, String::new()), // second clone
            ])
            .with_which(true),
        );
        let ctx = make_context_with(Profile::Global, dir.path(), dir.path(), executor);

        BootstrapVersionManager.run(&ctx).unwrap();
        let rc = dir.path().join(".bashrc");
        let first = std::fs::read_to_string(&rc).unwrap();
        assert!(first.contains(MARKER_BEGIN));
        assert!(first.contains("ASDF_DIR"));

        // Second run reinstalls but must not duplicate the block.
        BootstrapVersionManager.run(&ctx).unwrap();
        let second = std::fs::read_to_string(&rc).unwrap();
        assert_eq!(second.matches(MARKER_BEGIN).count(), 1);
    }

    #[test]
    fn verification_failure_is_terminal() {
        let dir = tempfile::tempdir().unwrap();
        // Clone "succeeds" but nothing lands on disk and which() is false.
        let executor =
            Arc::new(MockExecutor::with_responses(vec![(true, String::new())]).with_which(false));
        let ctx = make_context_with(Profile::Global, dir.path(), dir.path(), executor);

        let err = BootstrapVersionManager.run(&ctx).unwrap_err();
        assert!(err.to_string().contains("restart your terminal"));
    }

    #[test]
    fn activation_lines_differ_per_shell() {
        let dir = Path::new("/home/u/.asdf");
        let bash = activation_lines(dir, Shell::Bash);
        let zsh = activation_lines(dir, Shell::Zsh);
        assert!(bash.iter().any(|l| l.contains("asdf.bash")));
        assert!(zsh.iter().any(|l| l.contains("fpath")));
    }

    #[test]
    fn step_is_fatal() {
        assert!(BootstrapVersionManager.fatal());
    }
}
