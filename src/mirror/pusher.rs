// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Copies git history from the source repository to the target through a
//! throwaway bare clone.
//!
//! ```text
//! temp-mirror-<millis>-XXXX/          (in work_dir, removed on every path)
//!   repo.git  <-- clone --bare https://<token>@host/src_owner/src_repo.git
//!      |  remote remove origin
//!      |  remote add origin https://<token>@host/dst_owner/dst_repo.git
//!      |  push --force origin main                 fatal on error
//!      |  push --force origin <other branches>     warning on error
//!      |  push origin --tags                       warning on error
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{error, info, warn};

use super::platform::Platform;
use super::types::MirrorJob;
use crate::core::env::CredentialProvider;
use crate::core::env::credentials::git_token;
use crate::error::{GuardResult, MirrorError};
use crate::git::GitTransport;

const REMOTE: &str = "origin";
const MAIN_BRANCH: &str = "main";
const PROTECTED_BRANCHES: [&str; 2] = ["main", "master"];

/// Something that went wrong after the initial push without failing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushWarning {
    Branch { branch: String, message: String },
    Tags { message: String },
    Cleanup { message: String },
}

impl std::fmt::Display for PushWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Branch { branch, message } => {
                write!(f, "Impossible de pousser la branche {branch}: {message}")
            }
            Self::Tags { message } => write!(f, "Impossible de pousser les tags: {message}"),
            Self::Cleanup { message } => {
                write!(f, "Impossible de nettoyer le dossier temporaire: {message}")
            }
        }
    }
}

/// Branches pushed and warnings collected by one transfer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushReport {
    pub pushed: Vec<String>,
    pub warnings: Vec<PushWarning>,
}

/// Whether the transfer ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    Pushed(PushReport),
    Skipped(String),
}

/// Pushes code between repositories of the same host.
#[derive(Clone)]
pub struct CodePusher {
    transport: Arc<dyn GitTransport>,
    credentials: Arc<dyn CredentialProvider>,
    git_host: String,
    work_dir: PathBuf,
}

impl std::fmt::Debug for CodePusher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodePusher")
            .field("git_host", &self.git_host)
            .field("work_dir", &self.work_dir)
            .finish_non_exhaustive()
    }
}

impl CodePusher {
    pub fn new(
        transport: Arc<dyn GitTransport>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            transport,
            credentials,
            git_host: "github.com".to_string(),
            work_dir: PathBuf::from("."),
        }
    }

    /// Host placed in clone and push URLs.
    #[must_use]
    pub fn with_git_host(mut self, host: impl Into<String>) -> Self {
        self.git_host = host.into();
        self
    }

    /// Directory the temporary clone is created in.
    #[must_use]
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    fn authenticated_url(&self, token: &str, owner: &str, repo: &str) -> String {
        format!("https://{token}@{}/{owner}/{repo}.git", self.git_host)
    }

    /// Pushes the source history, branches and tags to the target.
    ///
    /// Only GitHub to GitHub is supported; other pairs and missing tokens
    /// return [`PushOutcome::Skipped`].
    ///
    /// # Errors
    ///
    /// Returns `MirrorError::CodeTransferFailed` if the temporary directory,
    /// the clone, the remote setup or the push of `main` fails.
    pub async fn push_code(&self, job: &MirrorJob) -> GuardResult<PushOutcome> {
        if job.source_platform != Platform::GitHub || job.target_platform != Platform::GitHub {
            let reason = "Le push du code n'est actuellement supporté que pour GitHub vers GitHub";
            info!(source = %job.source_platform, target = %job.target_platform, "{reason}");
            return Ok(PushOutcome::Skipped(reason.to_string()));
        }

        let source_token = git_token(job.source_platform, self.credentials.as_ref());
        let target_token = git_token(job.target_platform, self.credentials.as_ref());
        let (Some(source_token), Some(target_token)) = (source_token, target_token) else {
            let reason = "Tokens manquants pour pousser le code";
            warn!("{reason}");
            return Ok(PushOutcome::Skipped(reason.to_string()));
        };

        let temp = tempfile::Builder::new()
            .prefix(&format!("temp-mirror-{}-", unix_millis()))
            .tempdir_in(&self.work_dir)
            .map_err(|e| MirrorError::CodeTransferFailed(e.to_string()))?;
        let clone_dir = temp.path().join("repo.git");

        let source_url = self.authenticated_url(&source_token, &job.source_owner, &job.source_repo);
        let target_url = self.authenticated_url(&target_token, &job.target_owner, &job.target_repo);
        let result = self.transfer(&clone_dir, &source_url, &target_url).await;

        let cleanup = temp.close().err().map(|e| {
            let warning = PushWarning::Cleanup {
                message: e.to_string(),
            };
            warn!("{warning}");
            warning
        });

        match result {
            Ok(mut report) => {
                report.warnings.extend(cleanup);
                info!("Code poussé avec succès vers le dépôt cible");
                Ok(PushOutcome::Pushed(report))
            }
            Err(e) => {
                let err = MirrorError::CodeTransferFailed(e.to_string());
                error!("{err}");
                Err(err.into())
            }
        }
    }

    async fn transfer(
        &self,
        clone_dir: &Path,
        source_url: &str,
        target_url: &str,
    ) -> GuardResult<PushReport> {
        let git = self.transport.as_ref();

        info!("Clonage du dépôt source");
        git.clone_bare(source_url, clone_dir).await?;

        info!("Configuration du remote cible");
        git.remove_remote(clone_dir, REMOTE).await?;
        git.add_remote(clone_dir, REMOTE, target_url).await?;

        info!("Push du code vers le dépôt cible");
        git.push(clone_dir, REMOTE, MAIN_BRANCH, true).await?;

        let mut report = PushReport {
            pushed: vec![MAIN_BRANCH.to_string()],
            warnings: Vec::new(),
        };

        let branches = git.list_branches(clone_dir).await?;
        for branch in branches
            .iter()
            .filter(|b| !PROTECTED_BRANCHES.contains(&b.as_str()))
        {
            match git.push(clone_dir, REMOTE, branch, true).await {
                Ok(()) => report.pushed.push(branch.clone()),
                Err(e) => {
                    let warning = PushWarning::Branch {
                        branch: branch.clone(),
                        message: e.to_string(),
                    };
                    warn!("{warning}");
                    report.warnings.push(warning);
                }
            }
        }

        if let Err(e) = git.push_tags(clone_dir, REMOTE).await {
            let warning = PushWarning::Tags {
                message: e.to_string(),
            };
            warn!("{warning}");
            report.warnings.push(warning);
        }

        Ok(report)
    }
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}
