//! Ecosystem profiles.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// One of the supported ecosystem bootstrap variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Global,
    Golang,
    Python,
    Terraform,
    Typescript,
}

/// All known profiles, in menu order.
pub const ALL_PROFILES: &[Profile] = &[
    Profile::Global,
    Profile::Golang,
    Profile::Python,
    Profile::Terraform,
    Profile::Typescript,
];

impl Profile {
    /// Profile name as used in the catalog and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Golang => "golang",
            Self::Python => "python",
            Self::Terraform => "terraform",
            Self::Typescript => "typescript",
        }
    }

    /// The named checks this profile runs, in insertion order.
    ///
    /// These are hook ids from the profile's emitted configuration; the
    /// check runner executes them one at a time so a failing check cannot
    /// prevent the others from running.
    #[must_use]
    pub const fn check_ids(self) -> &'static [&'static str] {
        match self {
            Self::Global => &[
                "trailing-whitespace",
                "end-of-file-fixer",
                "check-yaml",
                "check-added-large-files",
                "gitleaks",
            ],
            Self::Golang => &[
                "trailing-whitespace",
                "end-of-file-fixer",
                "check-yaml",
                "check-added-large-files",
                "gitleaks",
                "go-fmt",
                "go-mod-tidy",
                "golangci-lint",
            ],
            Self::Python => &[
                "trailing-whitespace",
                "end-of-file-fixer",
                "check-yaml",
                "check-added-large-files",
                "gitleaks",
                "black",
            ],
            Self::Terraform => &[
                "trailing-whitespace",
                "end-of-file-fixer",
                "check-yaml",
                "check-added-large-files",
                "gitleaks",
                "terraform_fmt",
                "terraform_validate",
                "terraform_tflint",
            ],
            Self::Typescript => &[
                "trailing-whitespace",
                "end-of-file-fixer",
                "check-yaml",
                "check-added-large-files",
                "gitleaks",
                "eslint",
                "prettier",
            ],
        }
    }
}

impl FromStr for Profile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "golang" | "go" => Ok(Self::Golang),
            "python" => Ok(Self::Python),
            "terraform" => Ok(Self::Terraform),
            "typescript" | "ts" => Ok(Self::Typescript),
            other => Err(ConfigError::InvalidProfile(other.to_string())),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
