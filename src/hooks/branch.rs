// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! `post-checkout` branch naming rules: `<type>/<description>`.

use std::path::Path;

use tracing::warn;

use super::Verdict;
use crate::config::HookRule;
use crate::git::VcsRunner;
use crate::git::query::current_branch;

const GIT_ERROR_NOTICE: &str = "Erreur Git, validation ignorée";

/// Branch name split into its type and (possibly empty) description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchName<'a> {
    pub branch_type: &'a str,
    pub description: &'a str,
}

impl<'a> BranchName<'a> {
    #[must_use]
    pub fn parse(branch: &'a str) -> Self {
        let (branch_type, description) = branch.split_once('/').unwrap_or((branch, ""));
        Self {
            branch_type,
            description,
        }
    }
}

/// Errors for `branch` under `rule`; empty when the name is accepted.
#[must_use]
pub fn validate_branch_name(branch: &str, rule: &HookRule) -> Vec<String> {
    let name = BranchName::parse(branch.trim());
    if rule.allowed_types.is_empty()
        || rule
            .allowed_types
            .iter()
            .any(|allowed| allowed == name.branch_type)
    {
        return Vec::new();
    }
    vec![format!(
        "Le type de branche \"{}\" n'est pas valide. Types autorisés: {}",
        name.branch_type,
        rule.allowed_types.join(", ")
    )]
}

/// Checks the checked-out branch. Git failures and detached HEAD never block.
pub async fn check_branch(git: &dyn VcsRunner, cwd: &Path, rule: &HookRule) -> Verdict {
    let branch = match current_branch(git, cwd).await {
        Ok(branch) if branch != "HEAD" => branch,
        Ok(_) => return Verdict::notice("HEAD détachée, validation ignorée"),
        Err(e) => {
            warn!(error = %e, "{GIT_ERROR_NOTICE}");
            return Verdict::notice(GIT_ERROR_NOTICE);
        }
    };

    let errors = validate_branch_name(&branch, rule);
    if errors.is_empty() {
        Verdict::valid()
    } else {
        Verdict::invalid_with_hint(errors, format!("git branch -m {branch} <type>/<description>"))
    }
}
