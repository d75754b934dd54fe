// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Authenticated clients for the platforms enabled in the configuration.
//!
//! ```text
//! mirroring.platforms.{p}.enabled == true
//!        |
//!        v
//! load_credentials(p, provider) --Err--> warn, record in skipped()
//!        |
//!        Ok
//!        v
//! PlatformClient::from_credentials --> clients[p]
//! ```
//!
//! A platform that fails here only surfaces later, as `UnsupportedPlatform`,
//! when a job actually needs it.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::client::PlatformClient;
use super::platform::Platform;
use crate::config::MirroringConfig;
use crate::config::types::ApiEndpoints;
use crate::core::env::{CredentialProvider, load_credentials};
use crate::error::MirrorError;

/// A platform left out of the registry and the reason why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPlatform {
    pub platform: Platform,
    pub reason: String,
}

/// Read-only map from platform to its client once built.
#[derive(Debug, Default)]
pub struct ClientRegistry {
    clients: BTreeMap<Platform, PlatformClient>,
    skipped: Vec<SkippedPlatform>,
}

impl ClientRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a client for every enabled platform whose credentials load.
    #[must_use]
    pub fn from_config(
        config: &MirroringConfig,
        provider: &dyn CredentialProvider,
        api: &ApiEndpoints,
    ) -> Self {
        let mut registry = Self::new();
        for platform in Platform::ALL {
            if !config.is_enabled(platform.id()) {
                continue;
            }
            match load_credentials(platform, provider) {
                Ok(credentials) => {
                    debug!(%platform, "client initialized");
                    registry.insert(PlatformClient::from_credentials(&credentials, api));
                }
                Err(e) => {
                    warn!(
                        %platform,
                        "Impossible d'initialiser le client {}: {e}",
                        platform.label()
                    );
                    registry.skipped.push(SkippedPlatform {
                        platform,
                        reason: e.to_string(),
                    });
                }
            }
        }
        registry
    }

    pub fn insert(&mut self, client: PlatformClient) {
        self.clients.insert(client.platform(), client);
    }

    #[must_use]
    pub fn with_client(mut self, client: PlatformClient) -> Self {
        self.insert(client);
        self
    }

    #[must_use]
    pub fn get(&self, platform: Platform) -> Option<&PlatformClient> {
        self.clients.get(&platform)
    }

    /// The client for `platform`.
    ///
    /// # Errors
    ///
    /// Returns `MirrorError::UnsupportedPlatform` if no client was built for it.
    pub fn require(&self, platform: Platform) -> Result<&PlatformClient, MirrorError> {
        self.get(platform)
            .ok_or_else(|| MirrorError::UnsupportedPlatform(platform.id().to_string()))
    }

    pub fn platforms(&self) -> impl Iterator<Item = Platform> + '_ {
        self.clients.keys().copied()
    }

    /// Enabled platforms that could not be initialized.
    #[must_use]
    pub fn skipped(&self) -> &[SkippedPlatform] {
        &self.skipped
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
