// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! One REST client per hosting platform, all speaking
//! [`RepoDescriptor`](super::types::RepoDescriptor) and
//! [`BranchDescriptor`](super::types::BranchDescriptor).

mod azure;
mod bitbucket;
mod github;
mod gitlab;

pub use azure::AzureClient;
pub use bitbucket::BitbucketClient;
pub use github::GitHubClient;
pub use gitlab::GitLabClient;
