// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! GitLab REST v4 client.
//!
//! ```text
//! get_repo       GET  /projects/{owner%2Frepo}
//! find_repo      GET  /projects?search={repo}   filter name + namespace
//! create_repo    GET  /namespaces/{owner}        -> namespace_id
//!                POST /projects  {name, description, visibility, namespace_id}
//! list_branches  GET  /projects/{id}/repository/branches?per_page=100
//! create_branch  POST /projects/{id}/repository/branches  {branch, ref}
//! ```
//!
//! Project search is fuzzy and spans namespaces, so a hit only counts when
//! both the name and the namespace match exactly. Creation targets the
//! owner's namespace explicitly so the next search finds the project there.

use serde::Deserialize;
use serde_json::json;

use crate::error::GuardResult;
use crate::mirror::types::{BranchDescriptor, RepoDescriptor};
use crate::net::{ApiClient, Auth, encode_component};

#[derive(Debug, Default, Deserialize)]
struct GlNamespace {
    #[serde(default)]
    name: String,
    #[serde(default)]
    path: String,
    #[serde(default)]
    full_path: String,
}

impl GlNamespace {
    fn matches(&self, owner: &str) -> bool {
        [&self.path, &self.name, &self.full_path]
            .into_iter()
            .any(|candidate| !candidate.is_empty() && candidate == owner)
    }
}

#[derive(Debug, Deserialize)]
struct GlNamespaceRef {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct GlProject {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    visibility: Option<String>,
    #[serde(default)]
    namespace: GlNamespace,
}

impl From<GlProject> for RepoDescriptor {
    fn from(project: GlProject) -> Self {
        let private = project.visibility.as_deref() != Some("public");
        Self::new(project.name, project.description.unwrap_or_default(), private)
    }
}

#[derive(Debug, Deserialize)]
struct GlCommit {
    id: String,
}

#[derive(Debug, Deserialize)]
struct GlBranch {
    name: String,
    commit: GlCommit,
}

/// GitLab API handle.
#[derive(Debug, Clone)]
pub struct GitLabClient {
    api: ApiClient,
}

impl GitLabClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api: ApiClient::new(
                base_url,
                Auth::Header {
                    name: "PRIVATE-TOKEN",
                    value: token.into(),
                },
            ),
        }
    }

    /// Project id accepted by the API: the url-encoded `owner/repo` path.
    fn project_id(owner: &str, repo: &str) -> String {
        if owner.is_empty() {
            encode_component(repo)
        } else {
            encode_component(&format!("{owner}/{repo}"))
        }
    }

    /// # Errors
    ///
    /// Returns a `NetworkError` if the project cannot be fetched.
    pub async fn get_repo(&self, owner: &str, repo: &str) -> GuardResult<RepoDescriptor> {
        let path = format!("/projects/{}", Self::project_id(owner, repo));
        let project: GlProject = self.api.get_json(&path).await?;
        Ok(project.into())
    }

    /// Searches projects by name and keeps the exact name + namespace match.
    ///
    /// # Errors
    ///
    /// Returns a `NetworkError` if the search request fails.
    pub async fn find_repo(&self, owner: &str, repo: &str) -> GuardResult<Option<RepoDescriptor>> {
        let path = format!("/projects?search={}", encode_component(repo));
        let projects: Vec<GlProject> = self.api.get_json(&path).await?;
        Ok(projects
            .into_iter()
            .find(|p| p.name == repo && p.namespace.matches(owner))
            .map(Into::into))
    }

    /// Creates the project under `owner` (user or group namespace), or
    /// under the token's user when `owner` is empty.
    ///
    /// # Errors
    ///
    /// Returns a `NetworkError` if the namespace cannot be resolved or
    /// GitLab rejects the creation.
    pub async fn create_repo(
        &self,
        owner: &str,
        repo: &RepoDescriptor,
        private: bool,
    ) -> GuardResult<RepoDescriptor> {
        let mut body = json!({
            "name": repo.name,
            "description": repo.description,
            "visibility": if private { "private" } else { "public" },
        });
        if !owner.is_empty() {
            let path = format!("/namespaces/{}", encode_component(owner));
            let namespace: GlNamespaceRef = self.api.get_json(&path).await?;
            body["namespace_id"] = json!(namespace.id);
        }
        let project: GlProject = self.api.post_json("/projects", &body).await?;
        Ok(project.into())
    }

    /// # Errors
    ///
    /// Returns a `NetworkError` if the branch list cannot be fetched.
    pub async fn list_branches(&self, owner: &str, repo: &str) -> GuardResult<Vec<BranchDescriptor>> {
        let path = format!(
            "/projects/{}/repository/branches?per_page=100",
            Self::project_id(owner, repo)
        );
        let branches: Vec<GlBranch> = self.api.get_json(&path).await?;
        Ok(branches
            .into_iter()
            .map(|b| BranchDescriptor::new(b.name, b.commit.id))
            .collect())
    }

    /// # Errors
    ///
    /// Returns a `NetworkError` if the branch cannot be created.
    pub async fn create_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &BranchDescriptor,
    ) -> GuardResult<()> {
        let path = format!(
            "/projects/{}/repository/branches",
            Self::project_id(owner, repo)
        );
        let body = json!({"branch": branch.name, "ref": branch.target_commit});
        self.api
            .post_json::<_, serde_json::Value>(&path, &body)
            .await?;
        Ok(())
    }
}
