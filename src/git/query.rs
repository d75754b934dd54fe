// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only repository questions asked by the hooks.
//!
//! ```text
//! current_branch          rev-parse --abbrev-ref HEAD
//! git_dir                 rev-parse --git-dir
//! remote_branch_exists    ls-remote --heads <remote> <branch>
//! fetch                   fetch <remote> <branch>
//! commits_behind          rev-list --count HEAD..<remote>/<branch>
//! has_uncommitted_changes status --porcelain
//! ```

use std::path::{Path, PathBuf};

use super::VcsRunner;
use crate::error::{GitError, GuardResult};

/// Name of the checked-out branch (`HEAD` when detached).
///
/// # Errors
///
/// Returns `GitError::CommandFailed` if git fails, e.g. outside a repository.
pub async fn current_branch(git: &dyn VcsRunner, cwd: &Path) -> GuardResult<String> {
    git.run(&["rev-parse", "--abbrev-ref", "HEAD"], cwd).await
}

/// Absolute path of the `.git` directory.
///
/// # Errors
///
/// Returns `GitError::CommandFailed` if `cwd` is not inside a repository.
pub async fn git_dir(git: &dyn VcsRunner, cwd: &Path) -> GuardResult<PathBuf> {
    let out = git.run(&["rev-parse", "--git-dir"], cwd).await?;
    let dir = PathBuf::from(out);
    Ok(if dir.is_absolute() { dir } else { cwd.join(dir) })
}

/// Whether `branch` exists on `remote`.
///
/// # Errors
///
/// Returns `GitError::CommandFailed` if the remote cannot be queried.
pub async fn remote_branch_exists(
    git: &dyn VcsRunner,
    cwd: &Path,
    remote: &str,
    branch: &str,
) -> GuardResult<bool> {
    let out = git.run(&["ls-remote", "--heads", remote, branch], cwd).await?;
    Ok(!out.trim().is_empty())
}

/// Fetch one branch from `remote`.
///
/// # Errors
///
/// Returns `GitError::CommandFailed` on network or remote errors.
pub async fn fetch(git: &dyn VcsRunner, cwd: &Path, remote: &str, branch: &str) -> GuardResult<()> {
    git.run(&["fetch", "--quiet", remote, branch], cwd).await?;
    Ok(())
}

/// Number of commits on `<remote>/<branch>` missing from `HEAD`.
///
/// # Errors
///
/// Returns `GitError::CommandFailed` if git fails or prints a non-number.
pub async fn commits_behind(
    git: &dyn VcsRunner,
    cwd: &Path,
    remote: &str,
    branch: &str,
) -> GuardResult<u32> {
    let range = format!("HEAD..{remote}/{branch}");
    let out = git.run(&["rev-list", "--count", range.as_str()], cwd).await?;
    out.trim().parse().map_err(|_| {
        GitError::CommandFailed {
            command: format!("git rev-list --count {range}"),
            message: format!("unexpected output: {out}"),
        }
        .into()
    })
}

/// Whether the working tree has staged, unstaged or untracked changes.
///
/// # Errors
///
/// Returns `GitError::CommandFailed` if `git status` fails.
pub async fn has_uncommitted_changes(git: &dyn VcsRunner, cwd: &Path) -> GuardResult<bool> {
    let out = git.run(&["status", "--porcelain"], cwd).await?;
    Ok(!out.trim().is_empty())
}
