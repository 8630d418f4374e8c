// Shared helpers for integration tests.
//
// Provides an isolated home/repository pair backed by temporary directories
// and a scripted toolchain executor, so each integration test can drive the
// full pipeline without touching the host system or spawning real processes.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use hookstrap_cli::config::{Catalog, Profile};
use hookstrap_cli::exec::{ExecResult, Executor};
use hookstrap_cli::logging::Logger;
use hookstrap_cli::platform::{Arch, Os, Platform};
use hookstrap_cli::steps::Context;

/// A scripted stand-in for the external toolchain.
///
/// Every command succeeds and returns canned output chosen by program name,
/// so the pipeline behaves as if `git`, `asdf`, and `pre-commit` were all
/// present and healthy. All invocations are recorded for assertions.
pub struct FakeToolchain {
    calls: Mutex<Vec<String>>,
    which_result: bool,
}

impl FakeToolchain {
    /// A toolchain where every binary resolves.
    pub fn healthy() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            which_result: true,
        }
    }

    /// A toolchain where no binary resolves.
    pub fn bare() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            which_result: false,
        }
    }

    /// All recorded invocations, as `program arg1 arg2 ...` strings.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls mutex").clone()
    }

    fn record(&self, program: &str, args: &[&str]) {
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        self.calls.lock().expect("calls mutex").push(line);
    }

    fn respond(program: &str) -> ExecResult {
        let stdout = match program {
            "python3" => "Python 3.12.7\n".to_string(),
            _ => String::new(),
        };
        ExecResult {
            stdout,
            stderr: String::new(),
            success: true,
            code: Some(0),
        }
    }
}

impl Executor for FakeToolchain {
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        self.record(program, args);
        Ok(Self::respond(program))
    }

    fn run_in(&self, _dir: &Path, program: &str, args: &[&str]) -> Result<ExecResult> {
        self.record(program, args);
        Ok(Self::respond(program))
    }

    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        self.record(program, args);
        Ok(Self::respond(program))
    }

    fn run_unchecked_in(&self, _dir: &Path, program: &str, args: &[&str]) -> Result<ExecResult> {
        self.record(program, args);
        Ok(Self::respond(program))
    }

    fn which(&self, _program: &str) -> bool {
        self.which_result
    }
}

/// An isolated home directory and target repository.
///
/// Both directories are deleted when the environment is dropped.
pub struct BootstrapEnv {
    pub home: tempfile::TempDir,
    pub repo: tempfile::TempDir,
}

impl BootstrapEnv {
    /// Create an environment whose repository is a Git repository.
    pub fn new() -> Self {
        let env = Self::without_git();
        std::fs::create_dir_all(env.repo.path().join(".git")).expect("create .git");
        env
    }

    /// Create an environment whose repository is a plain directory.
    pub fn without_git() -> Self {
        Self {
            home: tempfile::tempdir().expect("create home dir"),
            repo: tempfile::tempdir().expect("create repo dir"),
        }
    }

    /// Build a step context over this environment.
    pub fn context(
        &self,
        profile: Profile,
        executor: Arc<dyn Executor>,
        log: Arc<Logger>,
    ) -> Context {
        Context {
            profile,
            catalog: Catalog::load().expect("embedded catalog must parse"),
            home: self.home.path().to_path_buf(),
            repo: self.repo.path().to_path_buf(),
            shell_program: "/bin/bash".to_string(),
            platform: Platform::new(Os::Linux, Arch::Amd64),
            executor,
            log,
            dry_run: false,
            with_optional: false,
        }
    }
}
