// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Azure DevOps Git REST client. The owner is the project name and the base
//! URL is the organization URL (`https://dev.azure.com/<org>`).
//!
//! ```text
//! get_repo       GET  {project}/_apis/git/repositories/{repo}
//! find_repo      GET  {project}/_apis/git/repositories           filter value[].name
//! create_repo    POST {project}/_apis/git/repositories  {name}
//! list_branches  GET  {project}/_apis/git/repositories/{repo}/refs?filter=heads/
//! create_branch  POST {project}/_apis/git/repositories/{repo}/refs  [{name, oldObjectId, newObjectId}]
//! ```
//!
//! Visibility is a project setting, so repositories always report private.

use serde::Deserialize;
use serde_json::json;

use crate::error::GuardResult;
use crate::mirror::types::{BranchDescriptor, RepoDescriptor};
use crate::net::{ApiClient, Auth, encode_component};

const API_VERSION: &str = "api-version=7.1";

/// Object id meaning "ref does not exist yet".
const NULL_OBJECT_ID: &str = "0000000000000000000000000000000000000000";

#[derive(Debug, Deserialize)]
struct AzRepo {
    name: String,
}

impl From<AzRepo> for RepoDescriptor {
    fn from(repo: AzRepo) -> Self {
        Self::new(repo.name, String::new(), true)
    }
}

#[derive(Debug, Deserialize)]
struct AzList<T> {
    #[serde(default = "Vec::new")]
    value: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AzRef {
    name: String,
    object_id: String,
}

/// Azure DevOps API handle.
#[derive(Debug, Clone)]
pub struct AzureClient {
    api: ApiClient,
}

impl AzureClient {
    pub fn new(org_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api: ApiClient::new(
                org_url,
                Auth::Basic {
                    username: String::new(),
                    password: token.into(),
                },
            ),
        }
    }

    fn repos_path(project: &str) -> String {
        format!("/{}/_apis/git/repositories", encode_component(project))
    }

    fn repo_path(project: &str, repo: &str) -> String {
        format!("{}/{}", Self::repos_path(project), encode_component(repo))
    }

    /// # Errors
    ///
    /// Returns a `NetworkError` if the repository cannot be fetched.
    pub async fn get_repo(&self, project: &str, repo: &str) -> GuardResult<RepoDescriptor> {
        let path = format!("{}?{API_VERSION}", Self::repo_path(project, repo));
        let repo: AzRepo = self.api.get_json(&path).await?;
        Ok(repo.into())
    }

    /// # Errors
    ///
    /// Returns a `NetworkError` if the project repositories cannot be listed.
    pub async fn find_repo(&self, project: &str, repo: &str) -> GuardResult<Option<RepoDescriptor>> {
        let path = format!("{}?{API_VERSION}", Self::repos_path(project));
        let list: AzList<AzRepo> = self.api.get_json(&path).await?;
        Ok(list
            .value
            .into_iter()
            .find(|r| r.name == repo)
            .map(Into::into))
    }

    /// Creates the repository in `project`. The visibility flag has no
    /// repository-level equivalent and is not sent.
    ///
    /// # Errors
    ///
    /// Returns a `NetworkError` if Azure DevOps rejects the creation.
    pub async fn create_repo(&self, project: &str, repo: &RepoDescriptor) -> GuardResult<RepoDescriptor> {
        let path = format!("{}?{API_VERSION}", Self::repos_path(project));
        let created: AzRepo = self
            .api
            .post_json(&path, &json!({"name": repo.name}))
            .await?;
        let mut created: RepoDescriptor = created.into();
        created.description.clone_from(&repo.description);
        Ok(created)
    }

    /// # Errors
    ///
    /// Returns a `NetworkError` if the refs cannot be listed.
    pub async fn list_branches(&self, project: &str, repo: &str) -> GuardResult<Vec<BranchDescriptor>> {
        let path = format!(
            "{}/refs?filter=heads/&{API_VERSION}",
            Self::repo_path(project, repo)
        );
        let list: AzList<AzRef> = self.api.get_json(&path).await?;
        Ok(list
            .value
            .into_iter()
            .map(|r| {
                let name = r
                    .name
                    .strip_prefix("refs/heads/")
                    .map_or_else(|| r.name.clone(), str::to_string);
                BranchDescriptor::new(name, r.object_id)
            })
            .collect())
    }

    /// # Errors
    ///
    /// Returns a `NetworkError` if the ref update is rejected.
    pub async fn create_branch(
        &self,
        project: &str,
        repo: &str,
        branch: &BranchDescriptor,
    ) -> GuardResult<()> {
        let path = format!("{}/refs?{API_VERSION}", Self::repo_path(project, repo));
        let body = json!([{
            "name": format!("refs/heads/{}", branch.name),
            "oldObjectId": NULL_OBJECT_ID,
            "newObjectId": branch.target_commit,
        }]);
        self.api
            .post_json::<_, serde_json::Value>(&path, &body)
            .await?;
        Ok(())
    }
}
