// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Closed set of platform clients with uniform operations.

use tracing::warn;

use super::platform::Platform;
use super::providers::{AzureClient, BitbucketClient, GitHubClient, GitLabClient};
use super::types::{BranchDescriptor, RepoDescriptor};
use crate::config::types::ApiEndpoints;
use crate::core::env::PlatformCredentials;
use crate::error::GuardResult;

/// An authenticated client for one platform.
#[derive(Debug, Clone)]
pub enum PlatformClient {
    GitHub(GitHubClient),
    GitLab(GitLabClient),
    Bitbucket(BitbucketClient),
    Azure(AzureClient),
}

impl PlatformClient {
    /// Builds the client matching the credential bundle.
    #[must_use]
    pub fn from_credentials(credentials: &PlatformCredentials, api: &ApiEndpoints) -> Self {
        match credentials {
            PlatformCredentials::GitHub { token } => {
                Self::GitHub(GitHubClient::new(api.github.as_str(), token.as_str()))
            }
            PlatformCredentials::GitLab { token } => {
                Self::GitLab(GitLabClient::new(api.gitlab.as_str(), token.as_str()))
            }
            PlatformCredentials::Bitbucket { username, password } => Self::Bitbucket(
                BitbucketClient::new(api.bitbucket.as_str(), username.as_str(), password.as_str()),
            ),
            PlatformCredentials::Azure { url, token } => {
                Self::Azure(AzureClient::new(url.as_str(), token.as_str()))
            }
        }
    }

    #[must_use]
    pub const fn platform(&self) -> Platform {
        match self {
            Self::GitHub(_) => Platform::GitHub,
            Self::GitLab(_) => Platform::GitLab,
            Self::Bitbucket(_) => Platform::Bitbucket,
            Self::Azure(_) => Platform::Azure,
        }
    }

    /// # Errors
    ///
    /// Returns the provider error if the repository cannot be fetched.
    pub async fn get_repo(&self, owner: &str, repo: &str) -> GuardResult<RepoDescriptor> {
        match self {
            Self::GitHub(c) => c.get_repo(owner, repo).await,
            Self::GitLab(c) => c.get_repo(owner, repo).await,
            Self::Bitbucket(c) => c.get_repo(owner, repo).await,
            Self::Azure(c) => c.get_repo(owner, repo).await,
        }
    }

    /// Looks for an existing repository named `repo` owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns the provider error if the lookup request fails.
    pub async fn find_repo(&self, owner: &str, repo: &str) -> GuardResult<Option<RepoDescriptor>> {
        match self {
            Self::GitHub(c) => c.find_repo(owner, repo).await,
            Self::GitLab(c) => c.find_repo(owner, repo).await,
            Self::Bitbucket(c) => c.find_repo(owner, repo).await,
            Self::Azure(c) => c.find_repo(owner, repo).await,
        }
    }

    /// Creates `repo` with the platform's native visibility field.
    ///
    /// # Errors
    ///
    /// Returns the provider error if creation fails.
    pub async fn create_repo(
        &self,
        owner: &str,
        repo: &RepoDescriptor,
        private: bool,
    ) -> GuardResult<RepoDescriptor> {
        match self {
            Self::GitHub(c) => c.create_repo(owner, repo, private).await,
            Self::GitLab(c) => c.create_repo(owner, repo, private).await,
            Self::Bitbucket(c) => c.create_repo(owner, repo, private).await,
            Self::Azure(c) => {
                if !private {
                    warn!(repo = %repo.name, "visibilité publique ignorée pour Azure DevOps");
                }
                c.create_repo(owner, repo).await
            }
        }
    }

    /// # Errors
    ///
    /// Returns the provider error if the branches cannot be listed.
    pub async fn list_branches(&self, owner: &str, repo: &str) -> GuardResult<Vec<BranchDescriptor>> {
        match self {
            Self::GitHub(c) => c.list_branches(owner, repo).await,
            Self::GitLab(c) => c.list_branches(owner, repo).await,
            Self::Bitbucket(c) => c.list_branches(owner, repo).await,
            Self::Azure(c) => c.list_branches(owner, repo).await,
        }
    }

    /// # Errors
    ///
    /// Returns the provider error if the branch cannot be created.
    pub async fn create_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &BranchDescriptor,
    ) -> GuardResult<()> {
        match self {
            Self::GitHub(c) => c.create_branch(owner, repo, branch).await,
            Self::GitLab(c) => c.create_branch(owner, repo, branch).await,
            Self::Bitbucket(c) => c.create_branch(owner, repo, branch).await,
            Self::Azure(c) => c.create_branch(owner, repo, branch).await,
        }
    }
}
