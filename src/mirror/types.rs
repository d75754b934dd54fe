// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Platform-neutral descriptors and job parameters.

use bon::Builder;
use serde::{Deserialize, Serialize};

use super::platform::Platform;

/// Owner substituted for Bitbucket operations when none is given.
pub const DEFAULT_BITBUCKET_WORKSPACE: &str = "workspace";

/// Repository metadata shared by every platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoDescriptor {
    pub name: String,
    pub description: String,
    pub private: bool,
}

impl RepoDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>, private: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            private,
        }
    }
}

/// A branch and the commit it points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchDescriptor {
    pub name: String,
    pub target_commit: String,
}

impl BranchDescriptor {
    pub fn new(name: impl Into<String>, target_commit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_commit: target_commit.into(),
        }
    }
}

/// Parameters of one mirror run.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct MirrorJob {
    pub source_platform: Platform,
    pub target_platform: Platform,
    #[builder(into)]
    pub source_repo: String,
    #[builder(into)]
    pub target_repo: String,
    #[builder(into)]
    pub source_owner: String,
    #[builder(into)]
    pub target_owner: String,
    #[builder(default)]
    pub sync_branches: bool,
    #[builder(default)]
    pub make_public: bool,
}

/// Owner to use on `platform`, applying the Bitbucket workspace default.
#[must_use]
pub fn resolve_owner(platform: Platform, owner: Option<&str>) -> String {
    match owner.filter(|o| !o.is_empty()) {
        Some(owner) => owner.to_string(),
        None if platform == Platform::Bitbucket => DEFAULT_BITBUCKET_WORKSPACE.to_string(),
        None => String::new(),
    }
}
