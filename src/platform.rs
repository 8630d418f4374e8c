//! Platform detection: operating system, CPU architecture, interactive shell.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::PlatformError;

/// Detected operating system platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Linux,
    Macos,
}

impl Os {
    /// The identifier used in version-manager release archive names.
    #[must_use]
    pub const fn release_alias(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Macos => "darwin",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.release_alias())
    }
}

/// Detected CPU architecture, normalised to release archive aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    Amd64,
    Arm64,
}

impl Arch {
    /// Normalise a raw architecture string (as reported by the system) to a
    /// release alias: `x86_64` → `amd64`, `aarch64` → `arm64`.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::UnsupportedArch`] for anything else.
    pub fn from_raw(raw: &str) -> Result<Self, PlatformError> {
        match raw {
            "x86_64" | "amd64" => Ok(Self::Amd64),
            "aarch64" | "arm64" => Ok(Self::Arm64),
            other => Err(PlatformError::UnsupportedArch(other.to_string())),
        }
    }

    /// The identifier used in version-manager release archive names.
    #[must_use]
    pub const fn release_alias(self) -> &'static str {
        match self {
            Self::Amd64 => "amd64",
            Self::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.release_alias())
    }
}

/// Platform information for the current system.
#[derive(Debug, Clone, Copy)]
pub struct Platform {
    pub os: Os,
    pub arch: Arch,
}

impl Platform {
    /// Detect the current platform.
    ///
    /// # Errors
    ///
    /// Returns an error if the compile-time architecture has no release alias.
    pub fn detect() -> Result<Self, PlatformError> {
        Ok(Self {
            os: Self::detect_os(),
            arch: Arch::from_raw(std::env::consts::ARCH)?,
        })
    }

    /// Create a platform with explicit values (for testing).
    #[must_use]
    pub const fn new(os: Os, arch: Arch) -> Self {
        Self { os, arch }
    }

    const fn detect_os() -> Os {
        if cfg!(target_os = "macos") {
            Os::Macos
        } else {
            // Default to Linux for other Unix-like systems
            Os::Linux
        }
    }
}

/// The user's interactive shell, as derived from the configured shell program.
///
/// Only shells the bootstrapper knows how to wire activation lines into are
/// represented; everything else is an explicit unsupported-shell failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
}

impl Shell {
    /// Derive the shell from the value of the `SHELL` environment variable
    /// (e.g. `/usr/bin/zsh`).
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::UnsupportedShell`] for shells without a known
    /// startup file, or [`PlatformError::DetectionFailed`] if the value is
    /// empty.
    pub fn from_program(program: &str) -> Result<Self, PlatformError> {
        let name = Path::new(program)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        match name.as_str() {
            "bash" => Ok(Self::Bash),
            "zsh" => Ok(Self::Zsh),
            "" => Err(PlatformError::DetectionFailed(
                "SHELL is not set".to_string(),
            )),
            other => Err(PlatformError::UnsupportedShell(other.to_string())),
        }
    }

    /// The startup file activation lines are appended to, under `home`.
    #[must_use]
    pub fn startup_file(self, home: &Path) -> PathBuf {
        match self {
            Self::Bash => home.join(".bashrc"),
            Self::Zsh => home.join(".zshrc"),
        }
    }

    /// Shell name as it appears in log output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bash => "bash",
            Self::Zsh => "zsh",
        }
    }
}
