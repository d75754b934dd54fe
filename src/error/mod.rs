// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              GuardError (~24 bytes)
//!                     |
//!   +-------+-------+-------+-------+-------+-------+
//!   |       |       |       |       |       |       |
//!   v       v       v       v       v       v       v
//! Mirror   Git   Network Config Credential Process Io/Other
//!  Box     Box     Box    Box     Box      Box   Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Mirror     UnsupportedPlatform, RepoCreationFailed, MirrorRepoFailed,
//!              BranchSyncFailed, CodeTransferFailed, ConfigurationMissing
//!   Git        CommandFailed
//!   Network    Reqwest, HttpError, InvalidUrl
//!   Config     ReadError, ParseError, WriteError, NotFound
//!   Credential Missing
//!   Process    ExecutableNotFound, SpawnFailed, NonZeroExit
//!
//! All variants boxed => GuardError fits in 24 bytes.
//! ```
//!
//! Validation failures are not errors: the constraint engine returns a
//! [`crate::hooks::Verdict`] and only the command layer turns it into an
//! exit code.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`GuardError`].
pub type GuardResult<T> = std::result::Result<T, GuardError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum GuardError {
    /// Mirroring pipeline error.
    #[error("{0}")]
    Mirror(#[from] Box<MirrorError>),

    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Network operation failed.
    #[error("network error: {0}")]
    Network(#[from] Box<NetworkError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Credential lookup failed.
    #[error("{0}")]
    Credential(#[from] Box<CredentialError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

impl GuardError {
    /// Create a [`GuardError::Other`] from any message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into().into_boxed_str())
    }

    /// Borrow the inner mirroring error, if this is one.
    #[must_use]
    pub fn as_mirror(&self) -> Option<&MirrorError> {
        match self {
            Self::Mirror(inner) => Some(inner),
            _ => None,
        }
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for GuardError {
                fn from(err: $error) -> Self {
                    GuardError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    MirrorError => Mirror,
    GitError => Git,
    NetworkError => Network,
    ConfigError => Config,
    CredentialError => Credential,
    ProcessError => Process,
    std::io::Error => Io,
}

impl From<reqwest::Error> for GuardError {
    fn from(err: reqwest::Error) -> Self {
        NetworkError::Reqwest(err).into()
    }
}

// --- Mirror Errors ---

/// Errors raised by the mirroring pipeline.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// Unknown platform identifier, or no client configured for it.
    #[error("Plateforme non prise en charge: {0}")]
    UnsupportedPlatform(String),

    /// Both the primary and the fallback creation strategies failed.
    #[error("Impossible de créer le dépôt: {0}")]
    RepoCreationFailed(String),

    /// Lookup of the source or creation of the target failed.
    #[error("Échec de la mise en miroir du dépôt: {0}")]
    MirrorRepoFailed(String),

    /// The initial listing of source branches failed.
    #[error("La synchronisation des branches a échoué: {0}")]
    BranchSyncFailed(String),

    /// Clone, remote setup or initial push failed.
    #[error("Échec du push du code: {0}")]
    CodeTransferFailed(String),

    /// Mirroring or project configuration absent when required.
    #[error("Configuration manquante: {0}")]
    ConfigurationMissing(String),
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Git command exited unsuccessfully or could not be started.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with a code outside the success set.
    #[error("process '{command}' exited with code {code}: {stderr}")]
    NonZeroExit {
        command: String,
        code: i32,
        stdout: String,
        stderr: String,
    },
}

// --- Network Errors ---

/// Network operation errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// HTTP error response.
    #[error("http error {status}: {url}")]
    HttpError { status: u16, url: String },

    /// Error from reqwest library.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl NetworkError {
    /// HTTP status of the failed response, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file not found.
    #[error("Fichier de configuration introuvable: {0}")]
    NotFound(String),
}

// --- Credential Errors ---

/// Credential lookup errors.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// A required variable is unset or empty.
    #[error("Variable d'environnement manquante: {0}")]
    Missing(String),
}
