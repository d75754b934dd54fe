// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! `validate` arguments.
//!
//! ```text
//! validate --hooks commit-msg <file|message>   commit message rules
//! validate --hooks post-checkout               branch name rules
//! validate --hooks pre-push                    divergence + code check
//! validate [--fix] [--strict]                  code check only
//! ```

use clap::Args;

use crate::hooks::CodeCheckOptions;

/// Arguments for the `validate` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ValidateArgs {
    /// Commit message, or the path of the file holding it.
    #[arg(value_name = "MESSAGE")]
    pub message: Option<String>,

    /// Let the lint tool fix what it can.
    #[arg(long)]
    pub fix: bool,

    /// Treat lint warnings as errors.
    #[arg(long)]
    pub strict: bool,

    /// Only report failures.
    #[arg(long)]
    pub silent: bool,

    /// Run the checks of this hook instead of the code check.
    #[arg(long = "hooks", value_name = "HOOK")]
    pub hook: Option<String>,
}

impl ValidateArgs {
    #[must_use]
    pub const fn code_options(&self) -> CodeCheckOptions {
        CodeCheckOptions {
            fix: self.fix,
            strict: self.strict,
            silent: self.silent,
        }
    }
}
