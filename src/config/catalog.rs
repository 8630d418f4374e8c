//! The embedded tool catalog: pinned versions and plugin sources.
//!
//! The catalog is data, not code — `catalog.toml` is compiled into the
//! binary and parsed once per run, so the pinned set is validated by the
//! test suite rather than scattered across install logic.

use std::collections::HashSet;

use serde::Deserialize;

use crate::config::Profile;
use crate::error::ConfigError;
use crate::platform::Platform;

const CATALOG_TOML: &str = include_str!("catalog.toml");

/// A single installable tool: name, exact pinned version, plugin source.
///
/// Names are unique within the catalog. Tools marked `optional` are only
/// installed when the user opts in.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub version: String,
    pub plugin_url: String,
    /// Profiles that install this tool.
    pub profiles: Vec<String>,
    #[serde(default)]
    pub optional: bool,
}

/// How the version manager itself is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallMethod {
    /// Clone the source repository at a pinned ref.
    Git,
    /// Download a prebuilt OS/architecture-matched archive.
    Archive,
}

/// The pinned version-management tool.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionManagerSpec {
    pub name: String,
    pub version: String,
    pub method: InstallMethod,
    pub repo: String,
    pub git_ref: String,
    archive_url: String,
}

impl VersionManagerSpec {
    /// Expand the archive URL template for the given platform.
    #[must_use]
    pub fn archive_url(&self, platform: Platform) -> String {
        self.archive_url
            .replace("{version}", &self.version)
            .replace("{os}", platform.os.release_alias())
            .replace("{arch}", platform.arch.release_alias())
    }
}

/// The full parsed catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    pub version_manager: VersionManagerSpec,
    #[serde(rename = "tool")]
    pub tools: Vec<ToolSpec>,
}

impl Catalog {
    /// Parse and validate the embedded catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCatalog`] on parse failure and
    /// [`ConfigError::DuplicateTool`] if two entries share a name.
    pub fn load() -> Result<Self, ConfigError> {
        let catalog: Self = toml::from_str(CATALOG_TOML)
            .map_err(|e| ConfigError::InvalidCatalog(e.to_string()))?;

        let mut seen = HashSet::new();
        for tool in &catalog.tools {
            if !seen.insert(tool.name.as_str()) {
                return Err(ConfigError::DuplicateTool(tool.name.clone()));
            }
            if tool.plugin_url.is_empty() {
                return Err(ConfigError::InvalidCatalog(format!(
                    "tool '{}' has an empty plugin_url",
                    tool.name
                )));
            }
        }
        Ok(catalog)
    }

    /// Tools installed by `profile`, mandatory tools first, catalog order
    /// preserved within each group.
    #[must_use]
    pub fn tools_for(&self, profile: Profile) -> Vec<&ToolSpec> {
        let for_profile = |spec: &&ToolSpec| spec.profiles.iter().any(|p| p == profile.name());
        let mut tools: Vec<&ToolSpec> = self
            .tools
            .iter()
            .filter(|t| for_profile(t) && !t.optional)
            .collect();
        tools.extend(self.tools.iter().filter(|t| for_profile(t) && t.optional));
        tools
    }

    /// Look up a tool by name.
    #[must_use]
    pub fn tool(&self, name: &str) -> Option<&ToolSpec> {
        self.tools.iter().find(|t| t.name == name)
    }
}
