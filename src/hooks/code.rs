// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Code quality check run by `validate` and at the end of `pre-push`.
//!
//! ```text
//! activateCQT == false          --> success, nothing runs
//! directories that exist        --> npx eslint <dirs> [--fix] [--max-warnings=0] [--config f]
//! none exist, onMissing=ignore  --> success
//! none exist, onMissing=error   --> failure
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::Verdict;
use crate::config::{OnMissing, ValidateConfig};
use crate::core::process::{ProcessBuilder, ProcessFlags};

/// Command-line switches of `validate`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodeCheckOptions {
    pub fix: bool,
    pub strict: bool,
    pub silent: bool,
}

/// Outcome of the code check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeValidation {
    pub success: bool,
    pub errors: Vec<String>,
}

impl CodeValidation {
    fn passed() -> Self {
        Self {
            success: true,
            errors: Vec::new(),
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            errors: vec![error.into()],
        }
    }
}

impl From<CodeValidation> for Verdict {
    fn from(validation: CodeValidation) -> Self {
        if validation.success {
            Self::valid()
        } else {
            Self::invalid(validation.errors)
        }
    }
}

/// Runs the lint tool over the configured directories of one project.
#[derive(Debug, Clone)]
pub struct CodeValidator {
    root: PathBuf,
    program: String,
}

impl CodeValidator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            program: "npx".to_string(),
        }
    }

    /// Replaces the launcher (`npx` by default).
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Arguments passed to the launcher, `None` when no directory exists.
    #[must_use]
    pub fn args(&self, config: &ValidateConfig, options: CodeCheckOptions) -> Option<Vec<String>> {
        let directories: Vec<String> = config
            .directories
            .iter()
            .filter(|dir| self.root.join(dir).exists())
            .cloned()
            .collect();
        if directories.is_empty() {
            return None;
        }

        let mut args = vec!["eslint".to_string()];
        args.extend(directories);
        if options.fix {
            args.push("--fix".to_string());
        }
        if options.strict {
            args.push("--max-warnings=0".to_string());
        }
        if let Some(file) = &config.config {
            args.push("--config".to_string());
            args.push(file.clone());
        }
        Some(args)
    }

    pub async fn validate(&self, config: &ValidateConfig, options: CodeCheckOptions) -> CodeValidation {
        if !config.activate_cqt {
            debug!("code quality tools disabled");
            return CodeValidation::passed();
        }

        let Some(args) = self.args(config, options) else {
            return match config.on_missing {
                OnMissing::Ignore => {
                    debug!(directories = ?config.directories, "no directory to validate");
                    CodeValidation::passed()
                }
                OnMissing::Error => CodeValidation::failed(format!(
                    "Aucun répertoire à valider: {}",
                    config.directories.join(", ")
                )),
            };
        };

        let launcher = match ProcessBuilder::which(&self.program) {
            Ok(launcher) => launcher,
            Err(e) => return CodeValidation::failed(e.to_string()),
        };
        let output = launcher
            .name(self.program.as_str())
            .args(&args)
            .cwd(&self.root)
            .flags(ProcessFlags::ALLOW_FAILURE)
            .capture_output()
            .run()
            .await;

        match output {
            Ok(output) if output.success() => {
                if !options.silent {
                    info!("Code validé");
                }
                CodeValidation::passed()
            }
            Ok(output) => {
                let stdout = output.stdout().trim();
                if stdout.is_empty() {
                    CodeValidation::failed(format!(
                        "{} a échoué avec le code {}",
                        self.program,
                        output.exit_code()
                    ))
                } else {
                    CodeValidation::failed(stdout)
                }
            }
            Err(e) => CodeValidation::failed(e.to_string()),
        }
    }
}
