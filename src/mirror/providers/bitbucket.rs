// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Bitbucket Cloud 2.0 client. The owner is the workspace slug.
//!
//! ```text
//! get_repo       GET  /repositories/{ws}/{slug}
//! find_repo      GET  /repositories/{ws}?pagelen=100     filter values[].name
//! create_repo    POST /repositories/{ws}/{slug}  {name, description, is_private, scm}
//! list_branches  GET  /repositories/{ws}/{slug}/refs/branches?pagelen=100
//! create_branch  POST /repositories/{ws}/{slug}/refs/branches  {name, target.hash}
//! ```

use serde::Deserialize;
use serde_json::json;

use crate::error::GuardResult;
use crate::mirror::types::{BranchDescriptor, RepoDescriptor};
use crate::net::{ApiClient, Auth, encode_component};

#[derive(Debug, Deserialize)]
struct BbRepo {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default = "default_private")]
    is_private: bool,
}

const fn default_private() -> bool {
    true
}

impl From<BbRepo> for RepoDescriptor {
    fn from(repo: BbRepo) -> Self {
        Self::new(repo.name, repo.description.unwrap_or_default(), repo.is_private)
    }
}

#[derive(Debug, Deserialize)]
struct BbPage<T> {
    #[serde(default = "Vec::new")]
    values: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct BbTarget {
    hash: String,
}

#[derive(Debug, Deserialize)]
struct BbBranch {
    name: String,
    target: BbTarget,
}

/// Bitbucket API handle.
#[derive(Debug, Clone)]
pub struct BitbucketClient {
    api: ApiClient,
}

impl BitbucketClient {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            api: ApiClient::new(
                base_url,
                Auth::Basic {
                    username: username.into(),
                    password: password.into(),
                },
            ),
        }
    }

    fn repo_path(workspace: &str, repo: &str) -> String {
        format!(
            "/repositories/{}/{}",
            encode_component(workspace),
            encode_component(repo)
        )
    }

    /// # Errors
    ///
    /// Returns a `NetworkError` if the repository cannot be fetched.
    pub async fn get_repo(&self, workspace: &str, repo: &str) -> GuardResult<RepoDescriptor> {
        let repo: BbRepo = self.api.get_json(&Self::repo_path(workspace, repo)).await?;
        Ok(repo.into())
    }

    /// Lists the workspace and keeps the repository named `repo`.
    ///
    /// # Errors
    ///
    /// Returns a `NetworkError` if the workspace cannot be listed.
    pub async fn find_repo(
        &self,
        workspace: &str,
        repo: &str,
    ) -> GuardResult<Option<RepoDescriptor>> {
        let path = format!(
            "/repositories/{}?pagelen=100",
            encode_component(workspace)
        );
        let page: BbPage<BbRepo> = self.api.get_json(&path).await?;
        Ok(page
            .values
            .into_iter()
            .find(|r| r.name == repo)
            .map(Into::into))
    }

    /// # Errors
    ///
    /// Returns a `NetworkError` if Bitbucket rejects the creation.
    pub async fn create_repo(
        &self,
        workspace: &str,
        repo: &RepoDescriptor,
        private: bool,
    ) -> GuardResult<RepoDescriptor> {
        let body = json!({
            "name": repo.name,
            "description": repo.description,
            "is_private": private,
            "scm": "git",
        });
        let created: BbRepo = self
            .api
            .post_json(&Self::repo_path(workspace, &repo.name), &body)
            .await?;
        Ok(created.into())
    }

    /// # Errors
    ///
    /// Returns a `NetworkError` if the branch list cannot be fetched.
    pub async fn list_branches(
        &self,
        workspace: &str,
        repo: &str,
    ) -> GuardResult<Vec<BranchDescriptor>> {
        let path = format!(
            "{}/refs/branches?pagelen=100",
            Self::repo_path(workspace, repo)
        );
        let page: BbPage<BbBranch> = self.api.get_json(&path).await?;
        Ok(page
            .values
            .into_iter()
            .map(|b| BranchDescriptor::new(b.name, b.target.hash))
            .collect())
    }

    /// # Errors
    ///
    /// Returns a `NetworkError` if the branch cannot be created.
    pub async fn create_branch(
        &self,
        workspace: &str,
        repo: &str,
        branch: &BranchDescriptor,
    ) -> GuardResult<()> {
        let path = format!("{}/refs/branches", Self::repo_path(workspace, repo));
        let body = json!({
            "name": branch.name,
            "target": {"hash": branch.target_commit},
        });
        self.api
            .post_json::<_, serde_json::Value>(&path, &body)
            .await?;
        Ok(())
    }
}
