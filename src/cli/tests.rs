// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::install::InstallSteps;
use crate::cli::mirror::Endpoints;
use crate::cli::{Cli, Command};
use clap::Parser;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("pushguardian").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_parse_mirror() {
    let cli = parse(&[
        "mirror",
        "--source",
        "github",
        "--target",
        "gitlab",
        "--source-repo",
        "repo-a",
        "--target-repo",
        "repo-a-mirror",
        "--source-owner",
        "myorg",
        "--target-owner",
        "myorg",
        "--sync-branches",
    ]);
    let Some(Command::Mirror(args)) = cli.command else {
        panic!("expected mirror command");
    };
    assert!(args.sync_branches);
    assert!(!args.public_repo);
    assert!(!args.generate);
    assert_eq!(
        args.endpoints(),
        Some(Endpoints {
            source: "github".to_string(),
            target: "gitlab".to_string(),
            source_repo: "repo-a".to_string(),
            target_repo: "repo-a-mirror".to_string(),
            source_owner: "myorg".to_string(),
            target_owner: "myorg".to_string(),
        })
    );
}

#[test]
fn test_mirror_endpoints_require_every_field() {
    let cli = parse(&["mirror", "--source", "github", "--target", "  ", "--generate"]);
    let Some(Command::Mirror(mut args)) = cli.command else {
        panic!("expected mirror command");
    };
    assert!(args.generate);
    assert_eq!(args.endpoints(), None);

    args.target = Some("gitlab".to_string());
    args.source_repo = Some("a".to_string());
    args.target_repo = Some("b".to_string());
    args.source_owner = Some("o".to_string());
    assert_eq!(args.endpoints(), None);
    args.target_owner = Some("o".to_string());
    assert!(args.endpoints().is_some());
}

#[test]
fn test_parse_validate_hook() {
    let cli = parse(&["validate", "--hooks", "commit-msg", ".git/COMMIT_EDITMSG"]);
    let Some(Command::Validate(args)) = cli.command else {
        panic!("expected validate command");
    };
    assert_eq!(args.hook.as_deref(), Some("commit-msg"));
    assert_eq!(args.message.as_deref(), Some(".git/COMMIT_EDITMSG"));
}

#[test]
fn test_parse_validate_code_options() {
    let cli = parse(&["validate", "--fix", "--strict", "--silent"]);
    let Some(Command::Validate(args)) = cli.command else {
        panic!("expected validate command");
    };
    insta::assert_debug_snapshot!(args.code_options(), @r"
    CodeCheckOptions {
        fix: true,
        strict: true,
        silent: true,
    }
    ");
}

#[test]
fn test_install_steps() {
    let steps = |args: &[&str]| {
        let mut all = vec!["install"];
        all.extend_from_slice(args);
        let cli = parse(&all);
        let Some(Command::Install(args)) = cli.command else {
            panic!("expected install command");
        };
        args.steps()
    };

    assert_eq!(
        steps(&[]),
        InstallSteps {
            hooks: true,
            code_quality: false,
            mirroring: true
        }
    );
    assert_eq!(
        steps(&["--all", "--skip-mirroring"]),
        InstallSteps {
            hooks: true,
            code_quality: true,
            mirroring: false
        }
    );
    assert_eq!(
        steps(&["--hooks"]),
        InstallSteps {
            hooks: true,
            code_quality: false,
            mirroring: false
        }
    );
}

#[test]
fn test_parse_install_lists() {
    let cli = parse(&[
        "install",
        "--mirroring",
        "--platforms",
        "github,azure",
        "--hook",
        "pre-push",
        "--file",
        "custom.json",
        "--force",
    ]);
    let Some(Command::Install(args)) = cli.command else {
        panic!("expected install command");
    };
    assert_eq!(args.platforms, vec!["github", "azure"]);
    assert_eq!(args.hook_list(), vec!["pre-push"]);
    assert!(args.force);
    assert_eq!(args.file.as_deref(), Some(std::path::Path::new("custom.json")));
}

#[test]
fn test_install_default_hooks() {
    let cli = parse(&["install"]);
    let Some(Command::Install(args)) = cli.command else {
        panic!("expected install command");
    };
    assert_eq!(args.hook_list(), vec!["commit-msg", "post-checkout", "pre-push"]);
}

#[test]
fn test_parse_global_options() {
    let cli = parse(&["validate", "-l", "4", "--log-file", "pg.log"]);
    assert_eq!(cli.global.log_level, Some(4));
    assert!(cli.global.log_file.is_some());
    assert!(Cli::try_parse_from(["pushguardian", "-l", "9", "validate"]).is_err());
}
