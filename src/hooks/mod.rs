// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git hook constraint engine.
//!
//! # Architecture
//!
//! ```text
//!                Gate::constrains(hook, message)
//!                          |
//!        no rule for hook  +--> Verdict::Valid
//!                          |
//!      +-------------------+-------------------+
//!      v                   v                   v
//!  commit-msg         post-checkout         pre-push
//!  format, type,      branch type/desc      new branch?
//!  length, separator  (git errors are       behind remote? dirty tree?
//!  auto-correction    non-fatal)            code validator (silent)
//!      |                   |                   |
//!      +-------------------+-------------------+
//!                          v
//!            Valid | Invalid { errors, hint } | Corrected
//! ```
//!
//! The engine never exits the process: the command layer turns an
//! [`Verdict::Invalid`] into exit code 1.

pub mod branch;
pub mod code;
pub mod commit_msg;
pub mod dispatch;
pub mod install;
pub mod pre_push;

#[cfg(test)]
mod tests;

pub use code::{CodeCheckOptions, CodeValidation, CodeValidator};
pub use commit_msg::{CommitMessageValidation, validate_commit_message};
pub use dispatch::Gate;
pub use install::{HookInstallReport, install_hooks};

pub const COMMIT_MSG: &str = "commit-msg";
pub const POST_CHECKOUT: &str = "post-checkout";
pub const PRE_PUSH: &str = "pre-push";

/// Hooks installed when none are named explicitly.
pub const DEFAULT_HOOKS: [&str; 3] = [COMMIT_MSG, POST_CHECKOUT, PRE_PUSH];

/// Result of one gate check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Accepted, optionally with something worth telling the user.
    Valid { notice: Option<String> },
    /// Rejected. `hint` is the command the user should run next.
    Invalid {
        errors: Vec<String>,
        hint: Option<String>,
    },
    /// Accepted after the commit message was rewritten on disk.
    Corrected { message: String },
}

impl Verdict {
    #[must_use]
    pub const fn valid() -> Self {
        Self::Valid { notice: None }
    }

    pub fn notice(notice: impl Into<String>) -> Self {
        Self::Valid {
            notice: Some(notice.into()),
        }
    }

    #[must_use]
    pub const fn invalid(errors: Vec<String>) -> Self {
        Self::Invalid { errors, hint: None }
    }

    pub fn invalid_with_hint(errors: Vec<String>, hint: impl Into<String>) -> Self {
        Self::Invalid {
            errors,
            hint: Some(hint.into()),
        }
    }

    /// Whether the commit or push may proceed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::Invalid { .. })
    }

    /// Process exit code for this verdict.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        if self.is_success() { 0 } else { 1 }
    }
}
