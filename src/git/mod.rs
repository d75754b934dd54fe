// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git access.
//!
//! ```text
//!   hooks (validators)          mirror (code pusher)
//!          |                            |
//!          v                            v
//!     VcsRunner                   GitTransport
//!   run(args, cwd)        clone_bare/remove_remote/add_remote
//!          |              push/list_branches/push_tags
//!          |                            |
//!          +-------------+--------------+
//!                        v
//!                    ShellGit
//!            git CLI via ProcessBuilder
//!   GCM_INTERACTIVE=never  GIT_TERMINAL_PROMPT=0
//! ```
//!
//! `query` holds the read-only questions the hooks ask (current branch,
//! divergence, dirty tree) expressed over any [`VcsRunner`].

pub mod backend;
pub mod query;


use async_trait::async_trait;
use std::path::Path;

use crate::error::GuardResult;

pub use backend::ShellGit;

/// Executes git subcommands and returns their trimmed stdout.
#[async_trait]
pub trait VcsRunner: Send + Sync {
    /// Run `git <args>` inside `cwd`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` if git cannot be started or exits
    /// unsuccessfully.
    async fn run(&self, args: &[&str], cwd: &Path) -> GuardResult<String>;
}

/// Git operations needed to copy a repository between remotes.
///
/// All methods fail with `GitError::CommandFailed`.
#[async_trait]
pub trait GitTransport: Send + Sync {
    /// Clone `url` into `dest` as a bare repository, so every branch is a local head.
    async fn clone_bare(&self, url: &str, dest: &Path) -> GuardResult<()>;

    async fn remove_remote(&self, repo: &Path, name: &str) -> GuardResult<()>;

    async fn add_remote(&self, repo: &Path, name: &str, url: &str) -> GuardResult<()>;

    /// Push one local branch to `remote`.
    async fn push(&self, repo: &Path, remote: &str, branch: &str, force: bool) -> GuardResult<()>;

    /// Names of all local branches.
    async fn list_branches(&self, repo: &Path) -> GuardResult<Vec<String>>;

    async fn push_tags(&self, repo: &Path, remote: &str) -> GuardResult<()>;
}
