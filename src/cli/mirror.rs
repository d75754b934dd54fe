// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! `mirror` arguments.
//!
//! Each endpoint option falls back to an environment variable so the CI
//! workflow can drive the command without flags.

use clap::Args;

/// Arguments for the `mirror` command.
#[derive(Debug, Clone, Default, Args)]
pub struct MirrorArgs {
    /// Source platform (github, gitlab, bitbucket, azure).
    #[arg(short = 's', long, env = "SOURCE_PLATFORM", value_name = "PLATFORM")]
    pub source: Option<String>,

    /// Target platform (github, gitlab, bitbucket, azure).
    #[arg(short = 't', long, env = "TARGET_PLATFORM", value_name = "PLATFORM")]
    pub target: Option<String>,

    /// Source repository name.
    #[arg(long = "source-repo", env = "SOURCE_REPO", value_name = "REPO")]
    pub source_repo: Option<String>,

    /// Target repository name.
    #[arg(long = "target-repo", env = "TARGET_REPO", value_name = "REPO")]
    pub target_repo: Option<String>,

    /// Owner (user, organization, workspace or project) of the source.
    #[arg(long = "source-owner", env = "SOURCE_OWNER", value_name = "OWNER")]
    pub source_owner: Option<String>,

    /// Owner (user, organization, workspace or project) of the target.
    #[arg(long = "target-owner", env = "TARGET_OWNER", value_name = "OWNER")]
    pub target_owner: Option<String>,

    /// Also create every source branch on the target.
    #[arg(long = "sync-branches")]
    pub sync_branches: bool,

    /// Create the target repository as public.
    #[arg(long = "public-repo")]
    pub public_repo: bool,

    /// Write the GitHub Actions workflow and exit.
    #[arg(long)]
    pub generate: bool,
}

/// The six endpoint parameters, all present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub source: String,
    pub target: String,
    pub source_repo: String,
    pub target_repo: String,
    pub source_owner: String,
    pub target_owner: String,
}

impl MirrorArgs {
    /// The endpoint parameters, or `None` when any is missing or blank.
    #[must_use]
    pub fn endpoints(&self) -> Option<Endpoints> {
        let field = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(ToString::to_string)
        };
        Some(Endpoints {
            source: field(&self.source)?,
            target: field(&self.target)?,
            source_repo: field(&self.source_repo)?,
            target_repo: field(&self.target_repo)?,
            source_owner: field(&self.source_owner)?,
            target_owner: field(&self.target_owner)?,
        })
    }
}
