// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! `pre-push` checks.
//!
//! ```text
//! current branch
//!   ls-remote: absent           --> Valid (new branch)
//!   ls-remote/fetch fails       --> warn, skip to code check
//!   rev-list HEAD..remote/b > 0
//!        dirty tree             --> Invalid, hint git stash && git pull && git stash pop
//!        clean tree             --> Invalid, hint git pull
//! code validator (silent)       --> Valid | Invalid
//! ```

use std::path::Path;

use tracing::{info, warn};

use super::Verdict;
use super::code::{CodeCheckOptions, CodeValidator};
use crate::config::ValidateConfig;
use crate::error::GuardResult;
use crate::git::VcsRunner;
use crate::git::query::{
    commits_behind, current_branch, fetch, has_uncommitted_changes, remote_branch_exists,
};

const REMOTE_CHECK_FAILED: &str = "Impossible de vérifier la branche distante";

/// Where the remote stands relative to the local branch.
enum RemoteState {
    NewBranch,
    Behind { commits: u32, dirty: bool },
    UpToDate,
}

async fn remote_state(
    git: &dyn VcsRunner,
    cwd: &Path,
    remote: &str,
    branch: &str,
) -> GuardResult<RemoteState> {
    if !remote_branch_exists(git, cwd, remote, branch).await? {
        return Ok(RemoteState::NewBranch);
    }
    fetch(git, cwd, remote, branch).await?;
    let commits = commits_behind(git, cwd, remote, branch).await?;
    if commits == 0 {
        return Ok(RemoteState::UpToDate);
    }
    let dirty = has_uncommitted_changes(git, cwd).await?;
    Ok(RemoteState::Behind { commits, dirty })
}

/// Runs the pre-push checks against `remote`.
pub async fn check_pre_push(
    git: &dyn VcsRunner,
    cwd: &Path,
    remote: &str,
    code: &CodeValidator,
    validate: &ValidateConfig,
) -> Verdict {
    let branch = match current_branch(git, cwd).await {
        Ok(branch) => branch,
        Err(e) => return Verdict::invalid(vec![format!("Erreur Git: {e}")]),
    };

    match remote_state(git, cwd, remote, &branch).await {
        Ok(RemoteState::NewBranch) => {
            info!(branch, "nouvelle branche distante");
            return Verdict::notice(format!(
                "Nouvelle branche {branch}, aucune vérification distante nécessaire"
            ));
        }
        Ok(RemoteState::Behind { commits, dirty }) => {
            let error = format!(
                "La branche distante {remote}/{branch} contient {commits} commit(s) absent(s) en local"
            );
            return if dirty {
                Verdict::invalid_with_hint(
                    vec![error, "Des modifications locales ne sont pas commitées".to_string()],
                    "git stash && git pull && git stash pop",
                )
            } else {
                Verdict::invalid_with_hint(vec![error], "git pull")
            };
        }
        Ok(RemoteState::UpToDate) => {}
        Err(e) => warn!(error = %e, "{REMOTE_CHECK_FAILED}"),
    }

    let options = CodeCheckOptions {
        silent: true,
        ..CodeCheckOptions::default()
    };
    code.validate(validate, options).await.into()
}
