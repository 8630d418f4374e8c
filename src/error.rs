//! Domain-specific error types for the bootstrapper.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Internal modules return typed errors (e.g., [`ConfigError`], [`StepError`])
//! while command handlers at the CLI boundary convert them to [`anyhow::Error`]
//! via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! HookstrapError
//! ├── Config(ConfigError)    — catalog parsing, profile resolution, templates
//! ├── Step(StepError)        — pipeline step execution
//! ├── Resource(ResourceError)— ledger, downloads, version-manager plugins
//! └── Platform(PlatformError)— shell / architecture detection failures
//! ```

use thiserror::Error;

/// Top-level error type for the bootstrapper.
///
/// Aggregates domain-specific sub-errors and is convertible to
/// [`anyhow::Error`] for use at CLI command boundaries.
#[derive(Error, Debug)]
pub enum HookstrapError {
    /// Configuration-related error (catalog, profile, template).
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline step execution error.
    #[error("Step execution error: {0}")]
    Step(#[from] StepError),

    /// Resource operation error (ledger, download, plugin).
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    /// Platform-specific operation error (shell or architecture detection).
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),
}

/// Errors that arise from catalog loading, profile resolution, and templates.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The requested profile name is not a known ecosystem profile.
    #[error(
        "Invalid profile '{0}': must be one of global, golang, python, terraform, typescript"
    )]
    InvalidProfile(String),

    /// The embedded tool catalog could not be parsed.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Two catalog entries share the same tool name.
    #[error("Duplicate tool '{0}' in catalog")]
    DuplicateTool(String),

    /// A template still contains an unresolved substitution slot after render.
    #[error("Template '{template}' has unresolved slot '{slot}'")]
    UnresolvedSlot {
        /// Name of the template being rendered.
        template: String,
        /// The slot that no substitution was supplied for.
        slot: String,
    },
}

/// Errors that arise during pipeline step execution.
#[derive(Error, Debug)]
pub enum StepError {
    /// A step failed to execute.
    #[error("Step '{step}' failed: {reason}")]
    ExecutionFailed {
        /// Name of the step that failed.
        step: String,
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// One or more required binaries were not found on the search path.
    ///
    /// The list preserves check order so the user sees exactly what the
    /// verifier probed, in the order it probed.
    #[error("Missing required tools: {}", .0.join(", "))]
    MissingDependencies(Vec<String>),

    /// One or more named checks failed after all of them ran.
    #[error("{} check(s) failed: {}", .0.len(), .0.join(", "))]
    ChecksFailed(Vec<String>),
}

/// Errors that arise from resource operations (ledger, downloads, plugins).
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The version ledger could not be read or atomically replaced.
    #[error("Ledger error at {path}: {message}")]
    Ledger {
        /// Path of the ledger file.
        path: String,
        /// Human-readable description of the failure.
        message: String,
    },

    /// The catalog has no plugin source URL for the named tool.
    ///
    /// Unknown tools fail closed rather than guessing a URL convention.
    #[error("No plugin URL specified for tool '{0}'")]
    NoPluginUrl(String),

    /// A release archive could not be downloaded.
    #[error("Download failed for {url}: {message}")]
    Download {
        /// URL that was requested.
        url: String,
        /// Human-readable description of the failure.
        message: String,
    },
}

/// Errors that arise from platform-specific detection.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The user's configured shell is not one the bootstrapper knows how to
    /// wire activation lines into. Deliberate scope limit, not a fallback.
    #[error("Unsupported shell '{0}': only bash and zsh are supported")]
    UnsupportedShell(String),

    /// The CPU architecture reported by the system has no known release alias.
    #[error("Unsupported architecture '{0}'")]
    UnsupportedArch(String),

    /// Platform detection failed (e.g., `SHELL` unset or home missing).
    #[error("Platform detection failed: {0}")]
    DetectionFailed(String),
}
