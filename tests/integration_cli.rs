// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with the command lines written by the hook scripts
//! and the CI workflow.

use clap::Parser;
use pushguardian::cli::{Cli, Command};
use pushguardian::hooks::install::hook_script;

/// Arguments after `pushguardian` in an installed hook script.
fn hook_command_line(hook: &str) -> Vec<String> {
    let script = hook_script(hook);
    let line = script
        .lines()
        .find(|l| l.starts_with("pushguardian "))
        .unwrap();
    line.trim_end_matches(" || exit 1")
        .split_whitespace()
        .map(|arg| arg.replace("\"$1\"", ".git/COMMIT_EDITMSG"))
        .collect()
}

// =============================================================================
// Hook scripts
// =============================================================================

#[test]
fn cli_parses_every_hook_script() {
    for hook in pushguardian::hooks::DEFAULT_HOOKS {
        let cli = Cli::try_parse_from(hook_command_line(hook)).unwrap();
        let Some(Command::Validate(args)) = cli.command else {
            panic!("hook {hook} does not run validate");
        };
        assert_eq!(args.hook.as_deref(), Some(hook));
    }
}

#[test]
fn cli_commit_msg_hook_passes_message_file() {
    let cli = Cli::try_parse_from(hook_command_line("commit-msg")).unwrap();
    let Some(Command::Validate(args)) = cli.command else {
        panic!("expected validate");
    };
    assert_eq!(args.message.as_deref(), Some(".git/COMMIT_EDITMSG"));
}

// =============================================================================
// Mirror Command
// =============================================================================

#[test]
fn cli_mirror_flags() {
    let cli = Cli::try_parse_from([
        "pushguardian",
        "mirror",
        "-s",
        "bitbucket",
        "-t",
        "azure",
        "--source-repo",
        "shop",
        "--target-repo",
        "shop",
        "--source-owner",
        "acme",
        "--target-owner",
        "Retail",
        "--public-repo",
    ])
    .unwrap();
    let Some(Command::Mirror(args)) = cli.command else {
        panic!("expected mirror");
    };
    assert!(args.public_repo);
    assert!(!args.sync_branches);
    let endpoints = args.endpoints().unwrap();
    assert_eq!(endpoints.source, "bitbucket");
    assert_eq!(endpoints.target_owner, "Retail");
}

#[test]
fn cli_mirror_generate_alone() {
    let cli = Cli::try_parse_from(["pushguardian", "mirror", "--generate"]).unwrap();
    let Some(Command::Mirror(args)) = cli.command else {
        panic!("expected mirror");
    };
    assert!(args.generate);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn cli_rejects_unknown_command() {
    assert!(Cli::try_parse_from(["pushguardian", "audit"]).is_err());
}

#[test]
fn cli_no_command() {
    let cli = Cli::try_parse_from(["pushguardian"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn cli_log_level_after_subcommand() {
    let cli = Cli::try_parse_from(["pushguardian", "install", "--hooks", "--log-level", "0"])
        .unwrap();
    assert_eq!(cli.global.log_level, Some(0));
}
