//! Marker-guarded blocks in the user's shell startup file.
//!
//! The startup file is externally owned; the bootstrapper only ever appends
//! one block, delimited by literal marker comments, and detects the marker
//! on re-runs so repeated invocations never duplicate entries.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

/// Opening marker for the managed block.
pub const MARKER_BEGIN: &str = "# >>> hookstrap managed block >>>";
/// Closing marker for the managed block.
pub const MARKER_END: &str = "# <<< hookstrap managed block <<<";

/// Result of ensuring the managed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStatus {
    /// The block was appended.
    Appended,
    /// The marker was already present; the file was not modified.
    AlreadyPresent,
}

/// Handle to a shell startup file (e.g. `~/.bashrc`).
#[derive(Debug, Clone)]
pub struct ShellProfile {
    path: PathBuf,
}

impl ShellProfile {
    /// Create a handle for the startup file at `path`.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the startup file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the managed block marker is already present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn has_block(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        Ok(contents.contains(MARKER_BEGIN))
    }

    /// Append the managed block containing `lines`, unless the marker is
    /// already present. Creates the startup file if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or appended to.
    pub fn ensure_block(&self, lines: &[String]) -> Result<BlockStatus> {
        if self.has_block()? {
            return Ok(BlockStatus::AlreadyPresent);
        }
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory: {}", parent.display()))?;
        }
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("opening {}", self.path.display()))?;
        writeln!(file, "\n{MARKER_BEGIN}")?;
        for line in lines {
            writeln!(file, "{line}")?;
        }
        writeln!(file, "{MARKER_END}")?;
        Ok(BlockStatus::Appended)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn lines() -> Vec<String> {
        vec![
            "export ASDF_DIR=\"$HOME/.asdf\"".to_string(),
            ". \"$HOME/.asdf/asdf.sh\"".to_string(),
        ]
    }

    #[test]
    fn has_block_false_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let profile = ShellProfile::new(dir.path().join(".bashrc"));
        assert!(!profile.has_block().unwrap());
    }

    #[test]
    fn ensure_block_creates_file_with_markers() {
        let dir = tempfile::tempdir().unwrap();
        let profile = ShellProfile::new(dir.path().join(".bashrc"));

        assert_eq!(profile.ensure_block(&lines()).unwrap(), BlockStatus::Appended);

        let contents = std::fs::read_to_string(profile.path()).unwrap();
        assert!(contents.contains(MARKER_BEGIN));
        assert!(contents.contains(MARKER_END));
        assert!(contents.contains("ASDF_DIR"));
    }

    #[test]
    fn ensure_block_preserves_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let profile = ShellProfile::new(dir.path().join(".zshrc"));
        std::fs::write(profile.path(), "alias ll='ls -la'\n").unwrap();

        profile.ensure_block(&lines()).unwrap();

        let contents = std::fs::read_to_string(profile.path()).unwrap();
        assert!(contents.starts_with("alias ll='ls -la'\n"));
        assert!(contents.contains(MARKER_BEGIN));
    }

    #[test]
    fn repeated_runs_do_not_duplicate_the_block() {
        let dir = tempfile::tempdir().unwrap();
        let profile = ShellProfile::new(dir.path().join(".bashrc"));

        assert_eq!(profile.ensure_block(&lines()).unwrap(), BlockStatus::Appended);
        let after_first = std::fs::read_to_string(profile.path()).unwrap();

        assert_eq!(
            profile.ensure_block(&lines()).unwrap(),
            BlockStatus::AlreadyPresent
        );
        let after_second = std::fs::read_to_string(profile.path()).unwrap();

        assert_eq!(after_first, after_second, "file must not change on re-run");
        assert_eq!(after_second.matches(MARKER_BEGIN).count(), 1);
    }
}
