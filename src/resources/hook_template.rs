//! Hook scripts in the Git template directory.
//!
//! Scripts installed here are propagated into repositories passively: a
//! fresh `git init` or `git clone` picks up the template directory, but
//! nothing is pushed into existing repositories.

use std::path::PathBuf;

use anyhow::{Context as _, Result};

/// Result of installing a hook script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookInstall {
    /// The script was written (new or content differed).
    Applied,
    /// The target already had identical content.
    AlreadyCorrect,
}

/// A managed hook script: embedded contents plus a target path inside the
/// Git template directory.
#[derive(Debug, Clone)]
pub struct HookScriptResource {
    /// Target path (e.g. `~/.git-templates/hooks/pre-commit`).
    pub target: PathBuf,
    /// Script contents.
    pub contents: &'static str,
}

impl HookScriptResource {
    /// Create a new hook script resource.
    #[must_use]
    pub const fn new(target: PathBuf, contents: &'static str) -> Self {
        Self { target, contents }
    }

    /// Hook name for log output.
    #[must_use]
    pub fn description(&self) -> String {
        self.target.file_name().map_or_else(
            || self.target.display().to_string(),
            |n| n.to_string_lossy().to_string(),
        )
    }

    /// Install the script, making it executable on Unix.
    ///
    /// Unlike configuration emission this is *managed* state: a target with
    /// stale content is rewritten. Identical content is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O or permission failures.
    pub fn install(&self) -> Result<HookInstall> {
        if self.target.exists() {
            let current = std::fs::read_to_string(&self.target)
                .with_context(|| format!("reading {}", self.target.display()))?;
            if current == self.contents {
                return Ok(HookInstall::AlreadyCorrect);
            }
        }

        if let Some(parent) = self.target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory: {}", parent.display()))?;
        }
        std::fs::write(&self.target, self.contents)
            .with_context(|| format!("writing hook: {}", self.target.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt as _;
            let mut perms = std::fs::metadata(&self.target)
                .with_context(|| format!("reading hook metadata: {}", self.target.display()))?
                .permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(&self.target, perms)
                .with_context(|| format!("setting hook permissions: {}", self.target.display()))?;
        }

        Ok(HookInstall::Applied)
    }
}
