// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types.
//!
//! # Project Policy (`pushguardian.config.json`)
//!
//! ```text
//! ProjectConfig
//!   validate   ValidateConfig   directories, onMissing, activateCQT
//!   hooks      hook name -> HookRule { type: [..], constraints }
//!   mirroring  MirroringConfig  platforms.{github,gitlab,..}.enabled
//!   install    InstallFlags
//! ```
//!
//! # Tool Settings (`pushguardian.toml`, `PUSHGUARDIAN_*`)
//!
//! ```text
//! Settings: log_level, log_file, config_path, env_file, api.*, git_host
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Structural constraints applied to a commit message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Constraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Literal separator required right after the bracketed type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub must_start_with: Option<String>,
    /// Separator inserted automatically when it is missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_start_with: Option<String>,
}

/// Rule set for one hook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookRule {
    /// Allowed commit or branch types. Empty means any type.
    #[serde(rename = "type", alias = "allowedTypes")]
    pub allowed_types: Vec<String>,
    pub constraints: Constraints,
}

/// What to do when none of the configured directories exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnMissing {
    #[default]
    Ignore,
    Error,
}

/// Code validation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidateConfig {
    pub directories: Vec<String>,
    pub on_missing: OnMissing,
    /// Run the code-quality tool at all.
    #[serde(rename = "activateCQT")]
    pub activate_cqt: bool,
    /// Custom lint configuration file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self {
            directories: vec!["src/".to_string()],
            on_missing: OnMissing::Ignore,
            activate_cqt: false,
            config: None,
        }
    }
}

/// Per-platform switch in the mirroring section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformToggle {
    pub enabled: bool,
}

/// Defaults recorded by `install --mirroring`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DefaultSettings {
    pub auto_sync: bool,
    /// Hours between scheduled syncs.
    pub sync_interval: u32,
    pub include_branches: bool,
    pub include_tags: bool,
}

impl Default for DefaultSettings {
    fn default() -> Self {
        Self {
            auto_sync: false,
            sync_interval: 24,
            include_branches: true,
            include_tags: true,
        }
    }
}

/// Mirroring section of the project configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MirroringConfig {
    pub enabled: bool,
    /// Keyed by platform identifier; unknown keys are kept but ignored.
    pub platforms: BTreeMap<String, PlatformToggle>,
    pub default_settings: DefaultSettings,
}

impl MirroringConfig {
    /// Whether the platform with this identifier is switched on.
    #[must_use]
    pub fn is_enabled(&self, platform: &str) -> bool {
        self.platforms.get(platform).is_some_and(|p| p.enabled)
    }
}

/// Which install steps have been run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InstallFlags {
    pub hooks: bool,
    pub mirroring: bool,
}

/// REST API base URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiEndpoints {
    pub github: String,
    pub gitlab: String,
    pub bitbucket: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            github: "https://api.github.com".to_string(),
            gitlab: "https://gitlab.com/api/v4".to_string(),
            bitbucket: "https://api.bitbucket.org/2.0".to_string(),
        }
    }
}

/// Tool settings, independent from the project policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Location of the project policy file.
    pub config_path: PathBuf,
    /// Location of the `.env` credentials file.
    pub env_file: PathBuf,
    pub api: ApiEndpoints,
    /// Host used in token-embedded clone URLs.
    pub git_host: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: None,
            log_file: None,
            config_path: PathBuf::from(super::CONFIG_FILE_NAME),
            env_file: PathBuf::from(".env"),
            api: ApiEndpoints::default(),
            git_host: "github.com".to_string(),
        }
    }
}
