//! Shared execution context for pipeline steps.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{Catalog, Profile};
use crate::error::PlatformError;
use crate::exec::Executor;
use crate::logging::Log;
use crate::platform::{Platform, Shell};
use crate::resources::Ledger;

/// Everything a step needs to run: the selected profile, the catalog,
/// resolved directories, the subprocess seam, and the logger.
pub struct Context {
    /// Selected ecosystem profile.
    pub profile: Profile,
    /// Parsed tool catalog.
    pub catalog: Catalog,
    /// User home directory (ledger, version manager, shell startup file).
    pub home: PathBuf,
    /// Target repository root.
    pub repo: PathBuf,
    /// Raw value of the user's configured shell program (`$SHELL`).
    pub shell_program: String,
    /// Detected OS and architecture.
    pub platform: Platform,
    /// Subprocess executor.
    pub executor: Arc<dyn Executor>,
    /// Logger for step output and summary recording.
    pub log: Arc<dyn Log>,
    /// Preview changes without applying.
    pub dry_run: bool,
    /// Also install the catalog's optional tools.
    pub with_optional: bool,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("profile", &self.profile)
            .field("home", &self.home)
            .field("repo", &self.repo)
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

impl Context {
    /// Handle to the installed-version ledger at its fixed home path.
    #[must_use]
    pub fn ledger(&self) -> Ledger {
        Ledger::new(self.home.join(".hookstrap").join("versions"))
    }

    /// The version manager's installation directory (e.g. `~/.asdf`).
    #[must_use]
    pub fn version_manager_dir(&self) -> PathBuf {
        self.home
            .join(format!(".{}", self.catalog.version_manager.name))
    }

    /// The Git template directory hook scripts are installed into.
    #[must_use]
    pub fn hook_template_dir(&self) -> PathBuf {
        self.home.join(".git-templates")
    }

    /// Resolve the user's interactive shell from the configured program.
    ///
    /// # Errors
    ///
    /// Returns an error for unsupported or undetectable shells.
    pub fn shell(&self) -> Result<Shell, PlatformError> {
        Shell::from_program(&self.shell_program)
    }
}
