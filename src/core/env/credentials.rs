// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-platform credential bundles.
//!
//! ```text
//! github     GITHUB_TOKEN
//! gitlab     GITLAB_TOKEN
//! bitbucket  BITBUCKET_USERNAME + BITBUCKET_PASSWORD
//! azure      AZURE_DEVOPS_URL + AZURE_DEVOPS_TOKEN
//! ```

use std::fmt;

use tracing::info;

use super::{CredentialProvider, get_env};
use crate::error::CredentialError;
use crate::mirror::Platform;

pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const GITLAB_TOKEN: &str = "GITLAB_TOKEN";
pub const BITBUCKET_USERNAME: &str = "BITBUCKET_USERNAME";
pub const BITBUCKET_PASSWORD: &str = "BITBUCKET_PASSWORD";
pub const AZURE_DEVOPS_URL: &str = "AZURE_DEVOPS_URL";
pub const AZURE_DEVOPS_TOKEN: &str = "AZURE_DEVOPS_TOKEN";

/// Credentials required to build one platform client.
#[derive(Clone, PartialEq, Eq)]
pub enum PlatformCredentials {
    GitHub { token: String },
    GitLab { token: String },
    Bitbucket { username: String, password: String },
    Azure { url: String, token: String },
}

impl PlatformCredentials {
    #[must_use]
    pub const fn platform(&self) -> Platform {
        match self {
            Self::GitHub { .. } => Platform::GitHub,
            Self::GitLab { .. } => Platform::GitLab,
            Self::Bitbucket { .. } => Platform::Bitbucket,
            Self::Azure { .. } => Platform::Azure,
        }
    }
}

// Secrets never reach Debug output.
impl fmt::Debug for PlatformCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GitHub { .. } => f.debug_struct("GitHub").field("token", &"***").finish(),
            Self::GitLab { .. } => f.debug_struct("GitLab").field("token", &"***").finish(),
            Self::Bitbucket { username, .. } => f
                .debug_struct("Bitbucket")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Self::Azure { url, .. } => f
                .debug_struct("Azure")
                .field("url", url)
                .field("token", &"***")
                .finish(),
        }
    }
}

/// Reads the credentials `platform` needs, failing on the first missing key.
///
/// # Errors
///
/// Returns `CredentialError::Missing` naming the first unset variable.
pub fn load_credentials(
    platform: Platform,
    provider: &dyn CredentialProvider,
) -> Result<PlatformCredentials, CredentialError> {
    let credentials = match platform {
        Platform::GitHub => {
            let token = get_env(provider, GITHUB_TOKEN, None, true)?;
            info!("Token GitHub chargé");
            PlatformCredentials::GitHub { token }
        }
        Platform::GitLab => {
            let token = get_env(provider, GITLAB_TOKEN, None, true)?;
            info!("Token GitLab chargé");
            PlatformCredentials::GitLab { token }
        }
        Platform::Bitbucket => {
            let username = get_env(provider, BITBUCKET_USERNAME, None, true)?;
            let password = get_env(provider, BITBUCKET_PASSWORD, None, true)?;
            info!("Credentials BitBucket chargés");
            PlatformCredentials::Bitbucket { username, password }
        }
        Platform::Azure => {
            let url = get_env(provider, AZURE_DEVOPS_URL, None, true)?;
            let token = get_env(provider, AZURE_DEVOPS_TOKEN, None, true)?;
            info!("Credentials Azure DevOps chargés");
            PlatformCredentials::Azure { url, token }
        }
    };
    Ok(credentials)
}

/// Token used to embed credentials into a git HTTPS URL, if the platform has one.
#[must_use]
pub fn git_token(platform: Platform, provider: &dyn CredentialProvider) -> Option<String> {
    let key = match platform {
        Platform::GitHub => GITHUB_TOKEN,
        Platform::GitLab => GITLAB_TOKEN,
        Platform::Bitbucket => BITBUCKET_PASSWORD,
        Platform::Azure => AZURE_DEVOPS_TOKEN,
    };
    get_env(provider, key, None, false)
        .ok()
        .filter(|token| !token.is_empty())
}
