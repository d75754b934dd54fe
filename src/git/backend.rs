// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shell git backend.
//!
//! ```text
//! ShellGit::run(args, cwd)
//!   --> ProcessBuilder("git") ALLOW_FAILURE + capture
//!   --> exit 0: stdout.trim()
//!       else:   GitError::CommandFailed { redacted command, redacted stderr }
//! ```

use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

use super::{GitTransport, VcsRunner};
use crate::core::process::{ProcessBuilder, ProcessFlags};
use crate::error::{GitError, GuardResult};
use crate::logging::{redact_text, redact_url};

/// Git CLI backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellGit;

impl ShellGit {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn describe(args: &[&str]) -> String {
        let redacted: Vec<String> = args.iter().map(|a| redact_url(a)).collect();
        format!("git {}", redacted.join(" "))
    }
}

#[async_trait]
impl VcsRunner for ShellGit {
    async fn run(&self, args: &[&str], cwd: &Path) -> GuardResult<String> {
        let git = ProcessBuilder::which("git").map_err(|e| GitError::CommandFailed {
            command: Self::describe(args),
            message: e.to_string(),
        })?;
        let output = git
            .name("git")
            .args(args)
            .cwd(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .flag(ProcessFlags::ALLOW_FAILURE)
            .capture_output()
            .run()
            .await
            .map_err(|e| GitError::CommandFailed {
                command: Self::describe(args),
                message: redact_text(&e.to_string()),
            })?;

        if !output.success() {
            return Err(GitError::CommandFailed {
                command: Self::describe(args),
                message: redact_text(output.stderr().trim()),
            }
            .into());
        }
        Ok(output.stdout().trim().to_string())
    }
}

#[async_trait]
impl GitTransport for ShellGit {
    async fn clone_bare(&self, url: &str, dest: &Path) -> GuardResult<()> {
        let dest_str = dest.to_string_lossy().into_owned();
        let parent = dest.parent().unwrap_or_else(|| Path::new("."));
        self.run(&["clone", "--bare", "--quiet", url, dest_str.as_str()], parent)
            .await?;
        debug!(url = %redact_url(url), dest = %dest.display(), "cloned");
        Ok(())
    }

    async fn remove_remote(&self, repo: &Path, name: &str) -> GuardResult<()> {
        self.run(&["remote", "remove", name], repo).await?;
        Ok(())
    }

    async fn add_remote(&self, repo: &Path, name: &str, url: &str) -> GuardResult<()> {
        self.run(&["remote", "add", name, url], repo).await?;
        Ok(())
    }

    async fn push(&self, repo: &Path, remote: &str, branch: &str, force: bool) -> GuardResult<()> {
        let mut args = vec!["push", "--quiet"];
        if force {
            args.push("--force");
        }
        args.extend([remote, branch]);
        self.run(&args, repo).await?;
        Ok(())
    }

    async fn list_branches(&self, repo: &Path) -> GuardResult<Vec<String>> {
        let out = self
            .run(
                &["for-each-ref", "--format=%(refname:short)", "refs/heads"],
                repo,
            )
            .await?;
        Ok(out
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }

    async fn push_tags(&self, repo: &Path, remote: &str) -> GuardResult<()> {
        self.run(&["push", "--quiet", remote, "--tags"], repo).await?;
        Ok(())
    }
}
