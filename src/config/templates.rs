//! Versioned file templates with named substitution slots.
//!
//! Each emitted artifact is a template resource under `templates/`, compiled
//! into the binary. Slots use `{{name}}` syntax; rendering fails if any slot
//! is left unresolved, so missing substitutions surface in tests rather than
//! in emitted files.

use crate::config::Profile;
use crate::error::ConfigError;

/// A named template with `{{slot}}` substitution points.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    /// Template name, used in error messages.
    pub name: &'static str,
    /// Raw template text.
    pub body: &'static str,
}

impl Template {
    /// Render the template, substituting each `(slot, value)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnresolvedSlot`] if any `{{slot}}` remains
    /// after substitution.
    pub fn render(&self, substitutions: &[(&str, &str)]) -> Result<String, ConfigError> {
        let mut out = self.body.to_string();
        for (slot, value) in substitutions {
            out = out.replace(&format!("{{{{{slot}}}}}"), value);
        }

        if let Some(start) = out.find("{{") {
            let rest = &out[start + 2..];
            let slot = rest
                .find("}}")
                .map_or_else(|| rest.to_string(), |end| rest[..end].to_string());
            return Err(ConfigError::UnresolvedSlot {
                template: self.name.to_string(),
                slot,
            });
        }
        Ok(out)
    }
}

/// One configuration artifact to emit: a template plus its fixed target
/// filename relative to the repository root.
#[derive(Debug, Clone, Copy)]
pub struct ConfigArtifact {
    pub template: Template,
    /// Target filename (e.g. `.pre-commit-config.yaml`).
    pub target: &'static str,
}

macro_rules! template {
    ($file:literal) => {
        Template {
            name: $file,
            body: include_str!(concat!("../../templates/", $file)),
        }
    };
}

/// Hook script installed into the Git template directory.
pub const HOOK_PRE_COMMIT: Template = template!("hooks/pre-commit");
/// Commit-message hook script installed into the Git template directory.
pub const HOOK_COMMIT_MSG: Template = template!("hooks/commit-msg");

/// The configuration artifacts emitted for `profile`, primary config first.
///
/// Each artifact is independently create-only: pre-existing files are left
/// untouched while missing ones are still created.
#[must_use]
pub fn artifacts(profile: Profile) -> Vec<ConfigArtifact> {
    match profile {
        Profile::Global => vec![ConfigArtifact {
            template: template!("pre-commit-global.yaml"),
            target: ".pre-commit-config.yaml",
        }],
        Profile::Golang => vec![
            ConfigArtifact {
                template: template!("pre-commit-golang.yaml"),
                target: ".pre-commit-config.yaml",
            },
            ConfigArtifact {
                template: template!("golangci.yaml"),
                target: ".golangci.yaml",
            },
        ],
        Profile::Python => vec![ConfigArtifact {
            template: template!("pre-commit-python.yaml"),
            target: ".pre-commit-config.yaml",
        }],
        Profile::Terraform => vec![
            ConfigArtifact {
                template: template!("pre-commit-terraform.yaml"),
                target: ".pre-commit-config.yaml",
            },
            ConfigArtifact {
                template: template!("tflint.hcl"),
                target: ".tflint.hcl",
            },
        ],
        Profile::Typescript => vec![
            ConfigArtifact {
                template: template!("pre-commit-typescript.yaml"),
                target: ".pre-commit-config.yaml",
            },
            ConfigArtifact {
                template: template!("eslintrc.json"),
                target: ".eslintrc.json",
            },
            ConfigArtifact {
                template: template!("prettierrc.json"),
                target: ".prettierrc.json",
            },
        ],
    }
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::config::profiles::ALL_PROFILES;

    #[test]
    fn render_without_slots_is_identity() {
        let t = Template {
            name: "plain",
            body: "repos: []\n",
        };
        assert_eq!(t.render(&[]).unwrap(), "repos: []\n");
    }

    #[test]
    fn render_substitutes_slot() {
        let t = Template {
            name: "t",
            body: "python{{python_version}}\n",
        };
        let out = t.render(&[("python_version", "3.11")]).unwrap();
        assert_eq!(out, "python3.11\n");
    }

    #[test]
    fn render_fails_on_unresolved_slot() {
        let t = Template {
            name: "t",
            body: "python{{python_version}}\n",
        };
        let err = t.render(&[]).unwrap_err();
        assert!(
            matches!(err, ConfigError::UnresolvedSlot { ref slot, .. } if slot == "python_version"),
            "expected UnresolvedSlot(python_version), got {err}"
        );
    }

    #[test]
    fn every_profile_emits_a_pre_commit_config() {
        for profile in ALL_PROFILES {
            let artifacts = artifacts(*profile);
            assert_eq!(
                artifacts[0].target, ".pre-commit-config.yaml",
                "{profile} primary artifact must be the hook config"
            );
        }
    }

    #[test]
    fn python_template_declares_version_slot() {
        let artifact = artifacts(Profile::Python)[0];
        assert!(artifact.template.body.contains("{{python_version}}"));
        let out = artifact
            .template
            .render(&[("python_version", "3.11")])
            .unwrap();
        assert!(out.contains("python3.11"));
    }

    #[test]
    fn python_template_contains_spec_hooks() {
        let artifact = artifacts(Profile::Python)[0];
        assert!(artifact.template.body.contains("id: black"));
        assert!(artifact.template.body.contains("id: gitleaks"));
        assert!(artifact.template.body.contains("id: trailing-whitespace"));
    }

    #[test]
    fn non_python_templates_render_with_no_substitutions() {
        for profile in ALL_PROFILES {
            if *profile == Profile::Python {
                continue;
            }
            for artifact in artifacts(*profile) {
                artifact
                    .template
                    .render(&[])
                    .unwrap_or_else(|e| panic!("{}: {e}", artifact.template.name));
            }
        }
    }

    #[test]
    fn typescript_companions_are_valid_json() {
        for artifact in artifacts(Profile::Typescript) {
            if artifact.target.ends_with(".json") {
                let rendered = artifact.template.render(&[]).unwrap();
                serde_json::from_str::<serde_json::Value>(&rendered)
                    .unwrap_or_else(|e| panic!("{}: {e}", artifact.target));
            }
        }
    }

    #[test]
    fn check_ids_appear_in_emitted_config() {
        // Every named check a profile runs must exist as a hook id in its
        // primary emitted configuration.
        for profile in ALL_PROFILES {
            let body = artifacts(*profile)[0].template.body;
            for id in profile.check_ids() {
                assert!(
                    body.contains(&format!("id: {id}")),
                    "{profile}: check '{id}' missing from template"
                );
            }
        }
    }

    #[test]
    fn hook_scripts_are_shell_scripts() {
        assert!(HOOK_PRE_COMMIT.body.starts_with("#!/bin/sh"));
        assert!(HOOK_COMMIT_MSG.body.starts_with("#!/bin/sh"));
    }
}
