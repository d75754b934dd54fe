// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! GitHub REST v3 client.
//!
//! ```text
//! get_repo       GET  /repos/{owner}/{repo}
//! create_repo    POST /user/repos          --fail--> POST /orgs/{owner}/repos
//! list_branches  GET  /repos/{owner}/{repo}/branches?per_page=100
//! create_branch  POST /repos/{owner}/{repo}/git/refs  {ref, sha}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::error::{GuardResult, MirrorError};
use crate::mirror::types::{BranchDescriptor, RepoDescriptor};
use crate::net::{ApiClient, Auth, encode_component, is_not_found};

#[derive(Debug, Deserialize)]
struct GhRepo {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default = "default_private")]
    private: bool,
}

const fn default_private() -> bool {
    true
}

impl From<GhRepo> for RepoDescriptor {
    fn from(repo: GhRepo) -> Self {
        Self::new(repo.name, repo.description.unwrap_or_default(), repo.private)
    }
}

#[derive(Debug, Deserialize)]
struct GhCommit {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct GhBranch {
    name: String,
    commit: GhCommit,
}

#[derive(Debug, Serialize)]
struct CreateRepo<'a> {
    name: &'a str,
    description: &'a str,
    private: bool,
}

/// GitHub API handle.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    api: ApiClient,
}

impl GitHubClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api: ApiClient::new(base_url, Auth::Bearer(token.into()))
                .with_accept("application/vnd.github+json"),
        }
    }

    fn repo_path(owner: &str, repo: &str) -> String {
        format!(
            "/repos/{}/{}",
            encode_component(owner),
            encode_component(repo)
        )
    }

    /// # Errors
    ///
    /// Returns a `NetworkError` if the repository cannot be fetched.
    pub async fn get_repo(&self, owner: &str, repo: &str) -> GuardResult<RepoDescriptor> {
        let repo: GhRepo = self.api.get_json(&Self::repo_path(owner, repo)).await?;
        Ok(repo.into())
    }

    /// Looks the repository up by name, `None` on 404.
    ///
    /// # Errors
    ///
    /// Returns a `NetworkError` for any other failure.
    pub async fn find_repo(&self, owner: &str, repo: &str) -> GuardResult<Option<RepoDescriptor>> {
        match self.get_repo(owner, repo).await {
            Ok(found) => Ok(Some(found)),
            Err(e) if is_not_found(&e) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Creates the repository for the authenticated user, then under the
    /// organization `owner` if that fails.
    ///
    /// # Errors
    ///
    /// Returns `MirrorError::RepoCreationFailed` carrying the organization error.
    pub async fn create_repo(
        &self,
        owner: &str,
        repo: &RepoDescriptor,
        private: bool,
    ) -> GuardResult<RepoDescriptor> {
        let body = CreateRepo {
            name: &repo.name,
            description: &repo.description,
            private,
        };
        match self.api.post_json::<_, GhRepo>("/user/repos", &body).await {
            Ok(created) => Ok(created.into()),
            Err(user_err) => {
                debug!(owner, error = %user_err, "user repository creation failed, trying organization");
                let path = format!("/orgs/{}/repos", encode_component(owner));
                self.api
                    .post_json::<_, GhRepo>(&path, &body)
                    .await
                    .map(Into::into)
                    .map_err(|org_err| MirrorError::RepoCreationFailed(org_err.to_string()).into())
            }
        }
    }

    /// # Errors
    ///
    /// Returns a `NetworkError` if the branch list cannot be fetched.
    pub async fn list_branches(&self, owner: &str, repo: &str) -> GuardResult<Vec<BranchDescriptor>> {
        let path = format!("{}/branches?per_page=100", Self::repo_path(owner, repo));
        let branches: Vec<GhBranch> = self.api.get_json(&path).await?;
        Ok(branches
            .into_iter()
            .map(|b| BranchDescriptor::new(b.name, b.commit.sha))
            .collect())
    }

    /// # Errors
    ///
    /// Returns a `NetworkError` if the ref cannot be created, e.g. it already exists.
    pub async fn create_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &BranchDescriptor,
    ) -> GuardResult<()> {
        let path = format!("{}/git/refs", Self::repo_path(owner, repo));
        let body = json!({
            "ref": format!("refs/heads/{}", branch.name),
            "sha": branch.target_commit,
        });
        self.api
            .post_json::<_, serde_json::Value>(&path, &body)
            .await?;
        Ok(())
    }
}
