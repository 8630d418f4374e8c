//! The installed-version ledger.
//!
//! A flat text file mapping tool name to the last-installed version, one
//! `tool version` pair per line. Updates rewrite the file wholesale: read,
//! drop the stale entry for the tool, append the new entry, then atomically
//! replace the file via a temporary file in the same directory. The ledger
//! file itself is never written in place, so an interrupted update leaves
//! the previous contents intact.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::error::ResourceError;

/// Handle to the ledger file. Holds no in-memory state; every operation
/// reads from or replaces the file on disk.
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    /// Create a handle for the ledger at `path`.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the underlying ledger file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn error(&self, message: impl Into<String>) -> ResourceError {
        ResourceError::Ledger {
            path: self.path.display().to_string(),
            message: message.into(),
        }
    }

    /// Read all `(tool, version)` entries, preserving line order.
    ///
    /// A missing ledger file reads as empty. Malformed lines (no version
    /// token) are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn read(&self) -> Result<Vec<(String, String)>, ResourceError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| self.error(format!("read failed: {e}")))?;
        Ok(contents
            .lines()
            .filter_map(|line| {
                let mut parts = line.split_whitespace();
                match (parts.next(), parts.next()) {
                    (Some(tool), Some(version)) => {
                        Some((tool.to_string(), version.to_string()))
                    }
                    _ => None,
                }
            })
            .collect())
    }

    /// Return the recorded version for `tool`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    pub fn version_of(&self, tool: &str) -> Result<Option<String>, ResourceError> {
        Ok(self
            .read()?
            .into_iter()
            .find(|(name, _)| name == tool)
            .map(|(_, version)| version))
    }

    /// Record `version` for `tool`, rewriting the ledger so exactly one line
    /// for the tool exists. All other entries keep their order.
    ///
    /// The new contents are written to a temporary file in the ledger's
    /// directory and atomically renamed over the ledger, so a failure at any
    /// point leaves the previous file unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read, the temporary file
    /// cannot be written, or the rename fails.
    pub fn record(&self, tool: &str, version: &str) -> Result<(), ResourceError> {
        let mut entries = self.read()?;
        entries.retain(|(name, _)| name != tool);
        entries.push((tool.to_string(), version.to_string()));

        let parent = self
            .path
            .parent()
            .ok_or_else(|| self.error("ledger path has no parent directory"))?;
        std::fs::create_dir_all(parent)
            .map_err(|e| self.error(format!("creating ledger directory: {e}")))?;

        // Temp file must live in the same directory as the ledger so the
        // final rename cannot cross a filesystem boundary.
        let mut tmp = tempfile::NamedTempFile::new_in(parent)
            .map_err(|e| self.error(format!("creating temp file: {e}")))?;
        for (name, ver) in &entries {
            writeln!(tmp, "{name} {ver}")
                .map_err(|e| self.error(format!("writing temp file: {e}")))?;
        }
        tmp.flush()
            .map_err(|e| self.error(format!("flushing temp file: {e}")))?;
        tmp.persist(&self.path)
            .map_err(|e| self.error(format!("atomic replace failed: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn ledger_in(dir: &Path) -> Ledger {
        Ledger::new(dir.join("versions"))
    }

    #[test]
    fn read_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ledger_in(dir.path()).read().unwrap().is_empty());
    }

    #[test]
    fn record_creates_file_and_parent() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(dir.path().join("state/versions"));
        ledger.record("gitleaks", "8.21.0").unwrap();
        assert_eq!(
            ledger.read().unwrap(),
            vec![("gitleaks".to_string(), "8.21.0".to_string())]
        );
    }

    #[test]
    fn record_replaces_stale_entry() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(dir.path());
        std::fs::write(
            ledger.path(),
            "pre-commit 4.0.1\ngitleaks 8.20.0\nterraform 1.9.8\n",
        )
        .unwrap();

        ledger.record("gitleaks", "8.21.0").unwrap();

        let entries = ledger.read().unwrap();
        let gitleaks: Vec<_> = entries.iter().filter(|(n, _)| n == "gitleaks").collect();
        assert_eq!(gitleaks.len(), 1, "exactly one gitleaks line");
        assert_eq!(gitleaks[0].1, "8.21.0");
        // Untouched entries survive.
        assert!(entries.contains(&("pre-commit".to_string(), "4.0.1".to_string())));
        assert!(entries.contains(&("terraform".to_string(), "1.9.8".to_string())));
    }

    #[test]
    fn repeated_records_never_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(dir.path());
        for version in ["1.0.0", "1.1.0", "1.2.0", "1.2.0"] {
            ledger.record("tflint", version).unwrap();
        }
        let entries = ledger.read().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0], ("tflint".to_string(), "1.2.0".to_string()));
    }

    #[test]
    fn uniqueness_holds_after_interleaved_updates() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(dir.path());
        for (tool, version) in [
            ("a", "1"),
            ("b", "1"),
            ("a", "2"),
            ("c", "1"),
            ("b", "2"),
            ("a", "3"),
        ] {
            ledger.record(tool, version).unwrap();
        }
        let entries = ledger.read().unwrap();
        let mut names: Vec<&str> = entries.iter().map(|(n, _)| n.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), entries.len(), "no duplicate tool tokens");
        assert_eq!(ledger.version_of("a").unwrap().as_deref(), Some("3"));
    }

    #[test]
    fn version_of_missing_tool_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(dir.path());
        ledger.record("gitleaks", "8.21.0").unwrap();
        assert_eq!(ledger.version_of("black").unwrap(), None);
    }

    #[test]
    fn malformed_lines_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(dir.path());
        std::fs::write(ledger.path(), "gitleaks 8.21.0\njunk\n\n").unwrap();
        assert_eq!(
            ledger.read().unwrap(),
            vec![("gitleaks".to_string(), "8.21.0".to_string())]
        );
    }

    #[cfg(unix)]
    #[test]
    fn failed_update_leaves_previous_ledger_intact() {
        use std::os::unix::fs::PermissionsExt as _;

        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(dir.path());
        let original = "pre-commit 4.0.1\ngitleaks 8.20.0\n";
        std::fs::write(ledger.path(), original).unwrap();

        // A read-only directory makes the temp-file creation fail before any
        // rename can happen.
        let mut perms = std::fs::metadata(dir.path()).unwrap().permissions();
        perms.set_mode(0o555);
        std::fs::set_permissions(dir.path(), perms).unwrap();

        let result = ledger.record("gitleaks", "8.21.0");

        let mut perms = std::fs::metadata(dir.path()).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(dir.path(), perms).unwrap();

        assert!(result.is_err(), "update in read-only dir must fail");
        assert_eq!(
            std::fs::read_to_string(ledger.path()).unwrap(),
            original,
            "prior ledger must be byte-for-byte unchanged"
        );
    }
}
