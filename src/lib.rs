//! Idempotent pre-commit toolchain bootstrapper.
//!
//! One-shot developer-machine tool that prepares a repository for hook-based
//! checks: it verifies prerequisite binaries, installs a version manager,
//! installs pinned tool versions, emits per-ecosystem configuration files
//! (create-only, never overwriting user customisations), wires Git hook
//! templates, and runs the configured checks once.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]** — profile resolution, the embedded tool catalog, and
//!   file templates with named substitution slots
//! - **[`resources`]** — idempotent filesystem and subprocess primitives
//!   (version ledger, create-only config files, shell profile blocks, …)
//! - **[`steps`]** — named pipeline steps wired to resources, executed
//!   sequentially in insertion order
//! - **[`commands`]** — top-level subcommand orchestration (`bootstrap`,
//!   `doctor`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod platform;
pub mod resources;
pub mod steps;
