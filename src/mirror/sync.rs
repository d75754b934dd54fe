// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mirror orchestration.
//!
//! ```text
//! mirror(job)
//!   1. RepoManager::create_or_update_repo     must succeed
//!   2. CodePusher::push_code                  skips unsupported pairs itself
//!   3. BranchSynchronizer::sync_branches      only with job.sync_branches
//! ```
//!
//! Steps run strictly in order; the first error stops the run and is
//! returned unchanged.

use tracing::{error, info};

use super::branch::{BranchSynchronizer, SyncReport};
use super::pusher::{CodePusher, PushOutcome};
use super::registry::ClientRegistry;
use super::repo::RepoManager;
use super::types::{MirrorJob, RepoDescriptor};
use crate::error::GuardResult;

/// What one mirror run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorReport {
    pub repo: RepoDescriptor,
    pub push: PushOutcome,
    /// `None` when branch synchronization was not requested.
    pub branches: Option<SyncReport>,
}

/// Runs mirror jobs against one registry.
#[derive(Debug)]
pub struct SyncManager {
    registry: ClientRegistry,
    pusher: CodePusher,
}

impl SyncManager {
    #[must_use]
    pub fn new(registry: ClientRegistry, pusher: CodePusher) -> Self {
        Self { registry, pusher }
    }

    #[must_use]
    pub const fn registry(&self) -> &ClientRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn repos(&self) -> RepoManager<'_> {
        RepoManager::new(&self.registry)
    }

    #[must_use]
    pub const fn branches(&self) -> BranchSynchronizer<'_> {
        BranchSynchronizer::new(&self.registry)
    }

    /// Mirrors the repository described by `job`.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error: `MirrorRepoFailed`,
    /// `CodeTransferFailed` or `BranchSyncFailed`.
    pub async fn mirror(&self, job: &MirrorJob) -> GuardResult<MirrorReport> {
        info!(
            source = %job.source_platform,
            target = %job.target_platform,
            repo = %job.source_repo,
            "mise en miroir"
        );
        self.run(job).await.inspect_err(|e| {
            error!("Échec de la mise en miroir: {e}");
        })
    }

    async fn run(&self, job: &MirrorJob) -> GuardResult<MirrorReport> {
        let repo = self.repos().create_or_update_repo(job).await?;
        let push = self.pusher.push_code(job).await?;
        let branches = if job.sync_branches {
            Some(self.branches().sync_branches(job).await?)
        } else {
            None
        };
        Ok(MirrorReport {
            repo,
            push,
            branches,
        })
    }
}
