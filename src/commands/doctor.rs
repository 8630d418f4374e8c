//! The `doctor` command: report environment health without changing it.

use std::sync::Arc;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::error::StepError;
use crate::exec::{Executor, SystemExecutor};
use crate::logging::Logger;
use crate::resources::Ledger;
use crate::steps::deps::{missing_binaries, REQUIRED_BINARIES};

use super::resolve_home;

/// Binaries the pipeline uses when available, but can work without.
const ADVISORY_BINARIES: &[&str] = &["asdf", "pre-commit", "commitlint"];

/// Report on required binaries, advisory binaries, and recorded versions.
///
/// Purely read-only; nothing on the system is modified.
///
/// # Errors
///
/// Returns an error when any required binary is missing, so the process
/// exits non-zero exactly as a failing bootstrap would.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    let executor = SystemExecutor;

    log.stage("Required binaries");
    for bin in REQUIRED_BINARIES {
        if executor.which(bin) {
            log.info(&format!("found: {bin}"));
        } else {
            log.error(&format!("missing: {bin}"));
        }
    }

    log.stage("Optional binaries");
    for bin in ADVISORY_BINARIES {
        if executor.which(bin) {
            log.info(&format!("found: {bin}"));
        } else {
            log.warn(&format!("not found: {bin}"));
        }
    }

    let home = resolve_home(global)?;
    let ledger = Ledger::new(home.join(".hookstrap").join("versions"));
    let entries = ledger.read()?;
    if entries.is_empty() {
        log.info("no tool versions recorded yet");
    } else {
        log.stage("Recorded tool versions");
        for (tool, version) in &entries {
            log.info(&format!("{tool} {version}"));
        }
    }

    let missing = missing_binaries(&executor);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(StepError::MissingDependencies(missing).into())
    }
}
