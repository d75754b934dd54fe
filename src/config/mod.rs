// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management.
//!
//! # Two Layers
//!
//! ```text
//! Project policy   pushguardian.config.json (project root, JSON)
//!                  hooks rules, validate, mirroring platforms
//!                  load() / save_merged() / write_default_if_missing()
//!
//! Tool settings    defaults < pushguardian.toml < PUSHGUARDIAN_* env
//!                  log level, API base URLs, file locations
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! PUSHGUARDIAN_LOG_LEVEL=4              → log_level = 4
//! PUSHGUARDIAN_CONFIG_PATH=ci.json      → config_path = "ci.json"
//! PUSHGUARDIAN_API__GITLAB=https://..   → api.gitlab = "https://.."
//! ```

pub mod loader;
pub mod merge;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{ConfigError, GuardResult};

pub use loader::SettingsLoader;
pub use types::{
    Constraints, DefaultSettings, HookRule, InstallFlags, MirroringConfig, OnMissing,
    PlatformToggle, Settings, ValidateConfig,
};

/// File name of the project policy, relative to the project root.
pub const CONFIG_FILE_NAME: &str = "pushguardian.config.json";

/// Project policy loaded from `pushguardian.config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub validate: ValidateConfig,
    /// Rule sets keyed by git hook name (`commit-msg`, `post-checkout`, ...).
    pub hooks: BTreeMap<String, HookRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirroring: Option<MirroringConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install: Option<InstallFlags>,
}

impl ProjectConfig {
    /// Load the policy file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist,
    /// `ReadError` if it cannot be read and `ParseError` if it is not a
    /// valid policy document.
    pub fn load(path: &Path) -> GuardResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content).map_err(|e| match e {
            ConfigError::ParseError { message, .. } => ConfigError::ParseError {
                path: path.display().to_string(),
                message,
            }
            .into(),
            other => other.into(),
        })
    }

    /// Parse a policy document from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` on invalid JSON or shape.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Rule set for a hook, if one is configured.
    #[must_use]
    pub fn hook_rule(&self, hook: &str) -> Option<&HookRule> {
        self.hooks.get(hook)
    }

    /// The policy written by `install --hooks` on a fresh project.
    #[must_use]
    pub fn default_policy() -> Self {
        let to_vec = |items: &[&str]| items.iter().map(ToString::to_string).collect();
        let mut hooks = BTreeMap::new();
        hooks.insert(
            "commit-msg".to_string(),
            HookRule {
                allowed_types: to_vec(&["ADD", "UPDATE", "DELETE", "FIX", "MERGE", "CHORE"]),
                constraints: Constraints {
                    max_length: Some(80),
                    ..Constraints::default()
                },
            },
        );
        hooks.insert(
            "post-checkout".to_string(),
            HookRule {
                allowed_types: to_vec(&[
                    "main", "develop", "staging", "feat", "fix", "chore", "hotfixes",
                ]),
                constraints: Constraints::default(),
            },
        );
        hooks.insert("pre-push".to_string(), HookRule::default());

        Self {
            validate: ValidateConfig::default(),
            hooks,
            mirroring: None,
            install: None,
        }
    }

    /// Write `self` into `path`, merging with whatever document is already there.
    ///
    /// Top-level keys unknown to [`ProjectConfig`] are preserved.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the existing file cannot be read or parsed,
    /// or if the merged document cannot be written.
    pub fn save_merged(&self, path: &Path) -> GuardResult<()> {
        let update = serde_json::to_value(self).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        save_value_merged(path, update)
    }

    /// Write the default policy unless a policy file already exists.
    ///
    /// Returns `true` when a file was created.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::WriteError` if the file cannot be written.
    pub fn write_default_if_missing(path: &Path) -> GuardResult<bool> {
        if path.exists() {
            debug!(path = %path.display(), "config already present");
            return Ok(false);
        }
        let content = serde_json::to_string_pretty(&Self::default_policy()).map_err(|e| {
            ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        })?;
        std::fs::write(path, content).map_err(|source| ConfigError::WriteError {
            path: path.display().to_string(),
            source,
        })?;
        info!(path = %path.display(), "default configuration created");
        Ok(true)
    }
}

/// Merge a raw JSON fragment into the document at `path` and write it back.
///
/// # Errors
///
/// Returns a `ConfigError` if the existing document is unreadable or
/// invalid, or if writing fails.
pub fn save_value_merged(path: &Path, update: serde_json::Value) -> GuardResult<()> {
    let mut document = if path.exists() {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?
    } else {
        serde_json::Value::Object(serde_json::Map::new())
    };

    merge::merge_json(&mut document, update);

    let content =
        serde_json::to_string_pretty(&document).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
    std::fs::write(path, content).map_err(|source| ConfigError::WriteError {
        path: path.display().to_string(),
        source,
    })?;
    debug!(path = %path.display(), "configuration saved");
    Ok(())
}

/// Load tool settings: defaults, then `pushguardian.toml`, then `PUSHGUARDIAN_*`.
///
/// # Errors
///
/// Returns an error if the settings file or an environment override is invalid.
pub fn load_settings() -> crate::error::Result<Settings> {
    SettingsLoader::new()
        .add_toml_file_optional("pushguardian.toml")
        .with_env_prefix("PUSHGUARDIAN")
        .build()
}
