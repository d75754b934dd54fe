// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment and credential access.
//!
//! # Architecture
//!
//! ```text
//! CredentialProvider (trait)
//!   ├── EnvCredentials   process env, then .env values as fallback
//!   └── MapCredentials   in-memory (tests, embedding)
//!
//! get_env(provider, key, default, required)
//!   empty value == missing
//!   required + missing --> CredentialError::Missing(key)
//! ```
//!
//! The process environment is never mutated: values read from `.env` only
//! fill keys the process environment does not define.

pub mod credentials;
pub mod dotenv;


use std::collections::BTreeMap;

use crate::error::CredentialError;

pub use credentials::{PlatformCredentials, load_credentials};

/// Source of secret values, injected wherever credentials are needed.
pub trait CredentialProvider: Send + Sync {
    /// Raw value for `key`, `None` when unset.
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads the process environment, falling back to values loaded from `.env`.
#[derive(Debug, Clone, Default)]
pub struct EnvCredentials {
    fallback: BTreeMap<String, String>,
}

impl EnvCredentials {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `values` for keys absent from the process environment.
    #[must_use]
    pub const fn with_fallback(values: BTreeMap<String, String>) -> Self {
        Self { fallback: values }
    }
}

impl CredentialProvider for EnvCredentials {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .or_else(|| self.fallback.get(key).cloned())
    }
}

/// Fixed in-memory credentials.
#[derive(Debug, Clone, Default)]
pub struct MapCredentials {
    values: BTreeMap<String, String>,
}

impl MapCredentials {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapCredentials {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl CredentialProvider for MapCredentials {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Looks up `key`, treating an empty value as missing.
///
/// # Errors
///
/// Returns `CredentialError::Missing` when the value is missing and
/// `required` is set.
pub fn get_env(
    provider: &dyn CredentialProvider,
    key: &str,
    default: Option<&str>,
    required: bool,
) -> Result<String, CredentialError> {
    match provider.get(key).filter(|v| !v.is_empty()) {
        Some(value) => Ok(value),
        None if required => Err(CredentialError::Missing(key.to_string())),
        None => Ok(default.unwrap_or_default().to_string()),
    }
}
