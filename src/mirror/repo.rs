// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository lookup and idempotent creation.

use tracing::{info, warn};

use super::platform::Platform;
use super::registry::ClientRegistry;
use super::types::{MirrorJob, RepoDescriptor, resolve_owner};
use crate::error::{GuardResult, MirrorError};

/// Uniform repository operations over the registry.
#[derive(Debug, Clone, Copy)]
pub struct RepoManager<'a> {
    registry: &'a ClientRegistry,
}

impl<'a> RepoManager<'a> {
    #[must_use]
    pub const fn new(registry: &'a ClientRegistry) -> Self {
        Self { registry }
    }

    /// Fetches repository metadata.
    ///
    /// # Errors
    ///
    /// Returns `MirrorError::UnsupportedPlatform` if no client exists for
    /// `platform`, or the provider error.
    pub async fn get_repo(
        &self,
        platform: Platform,
        repo: &str,
        owner: Option<&str>,
    ) -> GuardResult<RepoDescriptor> {
        let client = self.registry.require(platform)?;
        let owner = resolve_owner(platform, owner);
        client.get_repo(&owner, repo).await
    }

    /// Returns the existing repository with the same name and owner, or
    /// creates it. The new repository is private unless `make_public`.
    ///
    /// # Errors
    ///
    /// Returns `MirrorError::UnsupportedPlatform` if no client exists for
    /// `platform`, `MirrorError::RepoCreationFailed` or the provider error
    /// if creation fails.
    pub async fn create_repo(
        &self,
        platform: Platform,
        repo: &RepoDescriptor,
        owner: Option<&str>,
        make_public: bool,
    ) -> GuardResult<RepoDescriptor> {
        let client = self.registry.require(platform)?;
        let owner = resolve_owner(platform, owner);

        match client.find_repo(&owner, &repo.name).await {
            Ok(Some(existing)) => {
                info!(%platform, "Le dépôt {} existe déjà", repo.name);
                return Ok(existing);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(%platform, repo = %repo.name, error = %e, "repository lookup failed, creating");
            }
        }

        let created = client.create_repo(&owner, repo, !make_public).await?;
        info!(%platform, "Dépôt {} créé", created.name);
        Ok(created)
    }

    /// Ensures the job's target repository exists, described after the source.
    ///
    /// # Errors
    ///
    /// Returns `MirrorError::MirrorRepoFailed` wrapping any lookup or
    /// creation failure.
    pub async fn create_or_update_repo(&self, job: &MirrorJob) -> GuardResult<RepoDescriptor> {
        self.ensure_target(job)
            .await
            .map_err(|e| MirrorError::MirrorRepoFailed(e.to_string()).into())
    }

    async fn ensure_target(&self, job: &MirrorJob) -> GuardResult<RepoDescriptor> {
        let source = self
            .get_repo(
                job.source_platform,
                &job.source_repo,
                Some(job.source_owner.as_str()),
            )
            .await?;
        let target = RepoDescriptor::new(job.target_repo.as_str(), source.description, source.private);
        self.create_repo(
            job.target_platform,
            &target,
            Some(job.target_owner.as_str()),
            job.make_public,
        )
        .await
    }
}
