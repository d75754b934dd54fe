// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! `install` arguments.
//!
//! ```text
//! (no selection)  --> hooks + mirroring
//! --all           --> hooks + code-quality + mirroring
//! --skip-*        --> removes a step from the selection
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::hooks::DEFAULT_HOOKS;

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, Args)]
pub struct InstallArgs {
    /// Install the Git hook scripts and the default policy.
    #[arg(long)]
    pub hooks: bool,

    /// Set up code quality tools.
    #[arg(long = "code-quality")]
    pub code_quality: bool,

    /// Add the mirroring section to the configuration.
    #[arg(long)]
    pub mirroring: bool,

    /// Run every install step.
    #[arg(long)]
    pub all: bool,

    #[arg(long = "skip-hooks")]
    pub skip_hooks: bool,

    #[arg(long = "skip-code-quality")]
    pub skip_code_quality: bool,

    #[arg(long = "skip-mirroring")]
    pub skip_mirroring: bool,

    /// Overwrite existing hook scripts.
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Configuration file to write.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Hooks to install (default: commit-msg, post-checkout, pre-push).
    #[arg(long = "hook", value_name = "NAME", action = clap::ArgAction::Append)]
    pub hook_names: Vec<String>,

    /// Platforms to enable for mirroring, skipping the menu.
    #[arg(long, value_name = "PLATFORM", value_delimiter = ',')]
    pub platforms: Vec<String>,
}

/// Install steps after applying `--all` and the `--skip-*` flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallSteps {
    pub hooks: bool,
    pub code_quality: bool,
    pub mirroring: bool,
}

impl InstallArgs {
    #[must_use]
    pub const fn steps(&self) -> InstallSteps {
        let none_selected = !self.hooks && !self.code_quality && !self.mirroring;
        InstallSteps {
            hooks: (self.all || self.hooks || none_selected) && !self.skip_hooks,
            code_quality: (self.all || self.code_quality) && !self.skip_code_quality,
            mirroring: (self.all || self.mirroring || none_selected) && !self.skip_mirroring,
        }
    }

    /// Hooks to install, defaulting to the three managed hooks.
    #[must_use]
    pub fn hook_list(&self) -> Vec<String> {
        if self.hook_names.is_empty() {
            DEFAULT_HOOKS.iter().map(ToString::to_string).collect()
        } else {
            self.hook_names.clone()
        }
    }
}
