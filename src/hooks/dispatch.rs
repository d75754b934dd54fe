// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Routes a hook invocation to its validator.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::branch::check_branch;
use super::code::CodeValidator;
use super::commit_msg::check_commit_message;
use super::pre_push::check_pre_push;
use super::{COMMIT_MSG, POST_CHECKOUT, PRE_PUSH, Verdict};
use crate::config::ProjectConfig;
use crate::git::VcsRunner;

const DEFAULT_REMOTE: &str = "origin";

/// The constraint engine bound to one repository and policy.
pub struct Gate<'a> {
    git: &'a dyn VcsRunner,
    config: &'a ProjectConfig,
    cwd: PathBuf,
    remote: String,
    code: CodeValidator,
}

impl std::fmt::Debug for Gate<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gate")
            .field("cwd", &self.cwd)
            .field("remote", &self.remote)
            .finish_non_exhaustive()
    }
}

impl<'a> Gate<'a> {
    pub fn new(git: &'a dyn VcsRunner, config: &'a ProjectConfig, cwd: impl Into<PathBuf>) -> Self {
        let cwd = cwd.into();
        Self {
            git,
            config,
            code: CodeValidator::new(cwd.clone()),
            cwd,
            remote: DEFAULT_REMOTE.to_string(),
        }
    }

    #[must_use]
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    #[must_use]
    pub fn with_code_validator(mut self, code: CodeValidator) -> Self {
        self.code = code;
        self
    }

    #[must_use]
    pub const fn code(&self) -> &CodeValidator {
        &self.code
    }

    /// Checks `hook` against its rule. Hooks without a rule always pass.
    ///
    /// For `commit-msg`, `message` is the message text and `commit_file`
    /// the file git passed to the hook, if any.
    pub async fn constrains(
        &self,
        hook: &str,
        message: Option<&str>,
        commit_file: Option<&Path>,
    ) -> Verdict {
        let Some(rule) = self.config.hook_rule(hook) else {
            debug!(hook, "no rule configured");
            return Verdict::valid();
        };

        match hook {
            COMMIT_MSG => match message {
                Some(message) => {
                    check_commit_message(self.git, &self.cwd, message, commit_file, rule).await
                }
                None => Verdict::invalid(vec!["Message de commit manquant".to_string()]),
            },
            POST_CHECKOUT => check_branch(self.git, &self.cwd, rule).await,
            PRE_PUSH => {
                check_pre_push(
                    self.git,
                    &self.cwd,
                    &self.remote,
                    &self.code,
                    &self.config.validate,
                )
                .await
            }
            other => {
                debug!(hook = other, "no validator for hook");
                Verdict::valid()
            }
        }
    }
}
