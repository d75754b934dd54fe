// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Branch listing, creation and best-effort copy between platforms.
//!
//! ```text
//! list source branches ---Err---> BranchSyncFailed
//!        |
//!   for each branch (sequential)
//!        +--> create on target --Ok--> created
//!                               \-Err-> warn + failures
//! ```

use tracing::{info, warn};

use super::platform::Platform;
use super::registry::ClientRegistry;
use super::types::{BranchDescriptor, MirrorJob, resolve_owner};
use crate::error::{GuardResult, MirrorError};

/// A branch that could not be created on the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchFailure {
    pub branch: String,
    pub message: String,
}

/// Outcome of one branch synchronization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub created: Vec<String>,
    pub failures: Vec<BranchFailure>,
}

impl SyncReport {
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.created.len() + self.failures.len()
    }
}

/// Uniform branch operations over the registry.
#[derive(Debug, Clone, Copy)]
pub struct BranchSynchronizer<'a> {
    registry: &'a ClientRegistry,
}

impl<'a> BranchSynchronizer<'a> {
    #[must_use]
    pub const fn new(registry: &'a ClientRegistry) -> Self {
        Self { registry }
    }

    /// # Errors
    ///
    /// Returns `MirrorError::UnsupportedPlatform` if no client exists for
    /// `platform`, or the provider error.
    pub async fn get_branches(
        &self,
        platform: Platform,
        repo: &str,
        owner: Option<&str>,
    ) -> GuardResult<Vec<BranchDescriptor>> {
        let client = self.registry.require(platform)?;
        client
            .list_branches(&resolve_owner(platform, owner), repo)
            .await
    }

    /// # Errors
    ///
    /// Returns `MirrorError::UnsupportedPlatform` if no client exists for
    /// `platform`, or the provider error (e.g. the branch already exists).
    pub async fn create_branch(
        &self,
        platform: Platform,
        repo: &str,
        branch: &BranchDescriptor,
        owner: Option<&str>,
    ) -> GuardResult<()> {
        let client = self.registry.require(platform)?;
        client
            .create_branch(&resolve_owner(platform, owner), repo, branch)
            .await
    }

    /// Creates every source branch on the target, one at a time. A failed
    /// creation is recorded and the loop moves on.
    ///
    /// # Errors
    ///
    /// Returns `MirrorError::BranchSyncFailed` if the source branches cannot
    /// be listed.
    pub async fn sync_branches(&self, job: &MirrorJob) -> GuardResult<SyncReport> {
        let branches = self
            .get_branches(
                job.source_platform,
                &job.source_repo,
                Some(job.source_owner.as_str()),
            )
            .await
            .map_err(|e| MirrorError::BranchSyncFailed(e.to_string()))?;

        let mut report = SyncReport::default();
        for branch in &branches {
            match self
                .create_branch(
                    job.target_platform,
                    &job.target_repo,
                    branch,
                    Some(job.target_owner.as_str()),
                )
                .await
            {
                Ok(()) => report.created.push(branch.name.clone()),
                Err(e) => {
                    warn!("Impossible de créer la branche {}: {e}", branch.name);
                    report.failures.push(BranchFailure {
                        branch: branch.name.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        info!(
            created = report.created.len(),
            failed = report.failures.len(),
            "branches synchronisées"
        );
        Ok(report)
    }
}
