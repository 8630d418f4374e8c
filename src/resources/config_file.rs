//! Create-only configuration file emission.
//!
//! Emission never overwrites or merges: if the target file already exists,
//! whatever the user has there is left byte-for-byte untouched and the
//! emitter reports [`EmitStatus::Skipped`]. This is the central behavioural
//! contract of the whole tool.

use std::path::PathBuf;

use anyhow::{Context as _, Result};

/// Sentinel status returned by [`ConfigFileResource::emit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitStatus {
    /// The file did not exist and was created.
    Created,
    /// The file already existed and was left untouched.
    Skipped,
}

/// A configuration file to be created if absent.
#[derive(Debug, Clone)]
pub struct ConfigFileResource {
    /// Absolute target path.
    pub target: PathBuf,
    /// Fully rendered contents to write on creation.
    pub contents: String,
}

impl ConfigFileResource {
    /// Create a new config file resource.
    #[must_use]
    pub const fn new(target: PathBuf, contents: String) -> Self {
        Self { target, contents }
    }

    /// Target filename for log output.
    #[must_use]
    pub fn description(&self) -> String {
        self.target.file_name().map_or_else(
            || self.target.display().to_string(),
            |n| n.to_string_lossy().to_string(),
        )
    }

    /// Whether emission would be skipped (target already exists).
    #[must_use]
    pub fn exists(&self) -> bool {
        self.target.exists()
    }

    /// Emit the file: create it if absent, skip if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or the file cannot be
    /// created. A pre-existing target is never an error.
    pub fn emit(&self) -> Result<EmitStatus> {
        if self.target.exists() {
            return Ok(EmitStatus::Skipped);
        }
        if let Some(parent) = self.target.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory: {}", parent.display()))?;
        }
        std::fs::write(&self.target, &self.contents)
            .with_context(|| format!("writing {}", self.target.display()))?;
        Ok(EmitStatus::Created)
    }
}
