//! Installed tool versions managed through the version-manager CLI.
//!
//! All state lives inside the version manager; this resource only issues
//! `plugin list`, `plugin add`, `list`, `install`, and `global` commands
//! through the [`Executor`] seam.

use anyhow::{Result, bail};

use crate::config::ToolSpec;
use crate::error::ResourceError;
use crate::exec::Executor;

/// Outcome of ensuring a tool version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The version was installed and activated.
    Installed,
    /// The exact version string was already present; no install subprocess
    /// was invoked. The version is still (re)activated as the global one.
    AlreadyPresent,
}

/// A pinned tool version to be made available globally.
pub struct ToolVersionResource<'a> {
    spec: &'a ToolSpec,
    executor: &'a dyn Executor,
}

impl std::fmt::Debug for ToolVersionResource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolVersionResource")
            .field("tool", &self.spec.name)
            .field("version", &self.spec.version)
            .finish_non_exhaustive()
    }
}

impl<'a> ToolVersionResource<'a> {
    /// Create a resource for the given catalog entry.
    #[must_use]
    pub const fn new(spec: &'a ToolSpec, executor: &'a dyn Executor) -> Self {
        Self { spec, executor }
    }

    /// `tool version` for log output.
    #[must_use]
    pub fn description(&self) -> String {
        format!("{} {}", self.spec.name, self.spec.version)
    }

    /// Whether the version manager already has a plugin for this tool.
    fn plugin_registered(&self) -> Result<bool> {
        let result = self.executor.run_unchecked("asdf", &["plugin", "list"])?;
        // `plugin list` exits non-zero when no plugin is installed at all.
        Ok(result
            .stdout
            .lines()
            .any(|line| line.trim() == self.spec.name))
    }

    /// Register the plugin from the catalog's source URL if missing.
    ///
    /// Unknown tools fail closed: an empty URL is an error, never a guessed
    /// convention.
    fn ensure_plugin(&self) -> Result<()> {
        if self.spec.plugin_url.is_empty() {
            return Err(ResourceError::NoPluginUrl(self.spec.name.clone()).into());
        }
        if self.plugin_registered()? {
            return Ok(());
        }
        self.executor.run(
            "asdf",
            &["plugin", "add", &self.spec.name, &self.spec.plugin_url],
        )?;
        Ok(())
    }

    /// Whether the exact pinned version string is already installed.
    ///
    /// Comparison is plain string equality per installed-version line;
    /// `1.2.0` and `v1.2.0` are different versions here.
    fn version_installed(&self) -> Result<bool> {
        let result = self
            .executor
            .run_unchecked("asdf", &["list", &self.spec.name])?;
        if !result.success {
            // No versions installed yet.
            return Ok(false);
        }
        Ok(result
            .stdout
            .lines()
            .map(|line| line.trim().trim_start_matches('*').trim())
            .any(|line| line == self.spec.version))
    }

    /// Make the pinned version installed and globally active.
    ///
    /// # Errors
    ///
    /// Returns an error if the plugin cannot be registered or any
    /// version-manager command fails.
    pub fn ensure(&self) -> Result<InstallOutcome> {
        self.ensure_plugin()?;

        let outcome = if self.version_installed()? {
            InstallOutcome::AlreadyPresent
        } else {
            let result = self.executor.run_unchecked(
                "asdf",
                &["install", &self.spec.name, &self.spec.version],
            )?;
            if !result.success {
                bail!(
                    "asdf install {} {} failed: {}",
                    self.spec.name,
                    self.spec.version,
                    result.stderr.trim()
                );
            }
            InstallOutcome::Installed
        };

        self.executor.run(
            "asdf",
            &["global", &self.spec.name, &self.spec.version],
        )?;
        Ok(outcome)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::exec::test_helpers::MockExecutor;

    fn spec(name: &str, version: &str, plugin_url: &str) -> ToolSpec {
        ToolSpec {
            name: name.to_string(),
            version: version.to_string(),
            plugin_url: plugin_url.to_string(),
            profiles: vec!["global".to_string()],
            optional: false,
        }
    }

    #[test]
    fn description_joins_name_and_version() {
        let spec = spec("gitleaks", "8.21.0", "https://example.com/plugin.git");
        let executor = MockExecutor::ok("");
        let r = ToolVersionResource::new(&spec, &executor);
        assert_eq!(r.description(), "gitleaks 8.21.0");
    }

    #[test]
    fn ensure_fails_closed_without_plugin_url() {
        let spec = spec("mystery-tool", "1.0.0", "");
        let executor = MockExecutor::ok("");
        let r = ToolVersionResource::new(&spec, &executor);
        let err = r.ensure().unwrap_err();
        assert!(
            err.to_string().contains("No plugin URL"),
            "expected fail-closed error, got: {err}"
        );
        assert_eq!(executor.call_count(), 0, "no subprocess may be invoked");
    }

    #[test]
    fn ensure_skips_install_when_version_present() {
        let spec = spec("gitleaks", "8.21.0", "https://example.com/plugin.git");
        let executor = MockExecutor::with_responses(vec![
            (true, "gitleaks\nnodejs\n".to_string()), // plugin list
            (true, "  8.20.0\n* 8.21.0\n".to_string()), // asdf list
            (true, String::new()),                    // asdf global
        ]);
        let r = ToolVersionResource::new(&spec, &executor);
        assert_eq!(r.ensure().unwrap(), InstallOutcome::AlreadyPresent);
        assert_eq!(
            executor.call_count(),
            3,
            "exactly plugin-list, list, global; no install call"
        );
    }

    #[test]
    fn ensure_installs_missing_version() {
        let spec = spec("gitleaks", "8.21.0", "https://example.com/plugin.git");
        let executor = MockExecutor::with_responses(vec![
            (true, "gitleaks\n".to_string()),  // plugin list
            (true, "  8.20.0\n".to_string()),  // asdf list (exact pin absent)
            (true, String::new()),             // asdf install
            (true, String::new()),             // asdf global
        ]);
        let r = ToolVersionResource::new(&spec, &executor);
        assert_eq!(r.ensure().unwrap(), InstallOutcome::Installed);
        assert_eq!(executor.call_count(), 4);
    }

    #[test]
    fn version_match_is_exact_string_equality() {
        // "v8.21.0" in the installed list must NOT satisfy the pin "8.21.0".
        let spec = spec("gitleaks", "8.21.0", "https://example.com/plugin.git");
        let executor = MockExecutor::with_responses(vec![
            (true, "gitleaks\n".to_string()),
            (true, "  v8.21.0\n".to_string()),
            (true, String::new()), // asdf install
            (true, String::new()), // asdf global
        ]);
        let r = ToolVersionResource::new(&spec, &executor);
        assert_eq!(r.ensure().unwrap(), InstallOutcome::Installed);
    }

    #[test]
    fn ensure_registers_missing_plugin() {
        let spec = spec("tflint", "0.53.0", "https://example.com/asdf-tflint.git");
        let executor = MockExecutor::with_responses(vec![
            (true, "gitleaks\n".to_string()), // plugin list (tflint absent)
            (true, String::new()),            // plugin add
            (false, String::new()),           // asdf list: none installed yet
            (true, String::new()),            // asdf install
            (true, String::new()),            // asdf global
        ]);
        let r = ToolVersionResource::new(&spec, &executor);
        assert_eq!(r.ensure().unwrap(), InstallOutcome::Installed);
        assert_eq!(executor.call_count(), 5);
    }

    #[test]
    fn failed_install_surfaces_error() {
        let spec = spec("python", "3.12.7", "https://example.com/asdf-python.git");
        let executor = MockExecutor::with_responses(vec![
            (true, "python\n".to_string()), // plugin list
            (false, String::new()),         // asdf list: nothing yet
            (false, String::new()),         // asdf install fails
        ]);
        let r = ToolVersionResource::new(&spec, &executor);
        let err = r.ensure().unwrap_err();
        assert!(err.to_string().contains("asdf install python 3.12.7"));
    }
}
