//! Idempotent resource primitives.
//!
//! Each resource owns one piece of externally-visible state (the version
//! ledger, a configuration file, a shell startup block, a hook script, an
//! installed tool version) behind a narrow check-then-apply operation.
//! Nothing here holds global in-memory state across operations.
pub mod config_file;
pub mod hook_template;
pub mod ledger;
pub mod shell_profile;
pub mod tool_version;

pub use config_file::{ConfigFileResource, EmitStatus};
pub use hook_template::{HookInstall, HookScriptResource};
pub use ledger::Ledger;
pub use shell_profile::{BlockStatus, ShellProfile};
pub use tool_version::{InstallOutcome, ToolVersionResource};
