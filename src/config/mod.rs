//! Configuration: ecosystem profiles, the embedded tool catalog, and
//! file templates with named substitution slots.
pub mod catalog;
pub mod profiles;
pub mod templates;

pub use catalog::{Catalog, InstallMethod, ToolSpec, VersionManagerSpec};
pub use profiles::Profile;
pub use templates::{ConfigArtifact, Template};
