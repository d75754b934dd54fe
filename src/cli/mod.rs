// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! pushguardian [global options] <command>
//! mirror   [--source P --target P --source-repo R --target-repo R
//!           --source-owner O --target-owner O] [--sync-branches]
//!          [--public-repo] [--generate]
//! validate [message] [--fix] [--strict] [--silent] [--hooks NAME]
//! install  [--hooks] [--code-quality] [--mirroring] [--all]
//!          [--skip-hooks] [--skip-mirroring] [--force] [--file PATH]
//! ```

pub mod global;
pub mod install;
pub mod mirror;
pub mod validate;

#[cfg(test)]
mod tests;

use clap::{Parser, Subcommand};

use crate::cli::global::GlobalOptions;
use crate::cli::install::InstallArgs;
use crate::cli::mirror::MirrorArgs;
use crate::cli::validate::ValidateArgs;

/// Git hooks quality gate and repository mirroring.
#[derive(Debug, Parser)]
#[command(
    name = "pushguardian",
    author,
    version,
    about = "Git hooks quality gate and repository mirroring",
    long_about = "PushGuardian\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Validates commit messages, branch names and pushes from Git hooks,\n\
                  and mirrors repositories between GitHub, GitLab, Bitbucket and\n\
                  Azure DevOps.",
    after_help = "CONFIGURATION:\n\n\
                  The project policy lives in pushguardian.config.json at the project\n\
                  root (see `pushguardian install --hooks`). Tool settings are read from\n\
                  pushguardian.toml and PUSHGUARDIAN_* environment variables. Platform\n\
                  credentials come from the environment or a .env file."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Mirrors a repository to another platform.
    Mirror(MirrorArgs),

    /// Validates a commit message, a hook or the code.
    Validate(ValidateArgs),

    /// Installs hooks and configuration sections.
    Install(InstallArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
