// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the constraint engine.
//!
//! Runs the validators against real temporary repositories through the
//! shell git backend.

use std::path::{Path, PathBuf};

use pushguardian::config::ProjectConfig;
use pushguardian::core::process::ProcessBuilder;
use pushguardian::git::{ShellGit, VcsRunner};
use pushguardian::hooks::{
    COMMIT_MSG, DEFAULT_HOOKS, Gate, POST_CHECKOUT, PRE_PUSH, Verdict, install_hooks,
};
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn git_available() -> bool {
    ProcessBuilder::which("git").is_ok()
}

async fn git(cwd: &Path, args: &[&str]) -> String {
    ShellGit::new().run(args, cwd).await.unwrap()
}

async fn commit(cwd: &Path, message: &str) {
    git(
        cwd,
        &[
            "-c",
            "user.email=test@example.com",
            "-c",
            "user.name=Test",
            "commit",
            "--allow-empty",
            "--quiet",
            "-m",
            message,
        ],
    )
    .await;
}

/// Repository on `main` with one commit.
async fn init_repo(path: &Path) {
    git(path, &["init", "--quiet"]).await;
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]).await;
    commit(path, "[ADD]: initial commit").await;
}

/// A bare remote plus two clones of it: `(remote, local, other)`.
async fn remote_with_two_clones(root: &Path) -> (PathBuf, PathBuf, PathBuf) {
    let seed = root.join("seed");
    let remote = root.join("remote.git");
    let local = root.join("local");
    let other = root.join("other");
    std::fs::create_dir_all(&seed).unwrap();
    init_repo(&seed).await;

    let remote_str = remote.to_string_lossy().into_owned();
    git(root, &["clone", "--bare", "--quiet", "seed", "remote.git"]).await;
    git(root, &["clone", "--quiet", remote_str.as_str(), "local"]).await;
    git(root, &["clone", "--quiet", remote_str.as_str(), "other"]).await;
    (remote, local, other)
}

// =============================================================================
// Install
// =============================================================================

#[tokio::test]
async fn hooks_install_into_real_repository() {
    if !git_available() {
        return;
    }
    let temp = temp_dir();
    init_repo(temp.path()).await;

    let report = install_hooks(temp.path(), &DEFAULT_HOOKS, false).unwrap();
    assert_eq!(report.installed.len(), 3);

    let script = std::fs::read_to_string(temp.path().join(".git/hooks/commit-msg")).unwrap();
    assert!(script.starts_with("#!/bin/sh\n# PushGuardian commit-msg hook\n"));

    let again = install_hooks(temp.path(), &DEFAULT_HOOKS, false).unwrap();
    assert!(again.installed.is_empty());
    assert_eq!(again.skipped.len(), 3);
}

// =============================================================================
// post-checkout
// =============================================================================

#[tokio::test]
async fn post_checkout_follows_checked_out_branch() {
    if !git_available() {
        return;
    }
    let temp = temp_dir();
    init_repo(temp.path()).await;
    let config = ProjectConfig::default_policy();
    let shell = ShellGit::new();
    let gate = Gate::new(&shell, &config, temp.path());

    assert_eq!(gate.constrains(POST_CHECKOUT, None, None).await, Verdict::valid());

    git(temp.path(), &["checkout", "--quiet", "-b", "feat/login"]).await;
    assert!(gate.constrains(POST_CHECKOUT, None, None).await.is_success());

    git(temp.path(), &["checkout", "--quiet", "-b", "experiment/x"]).await;
    match gate.constrains(POST_CHECKOUT, None, None).await {
        Verdict::Invalid { errors, hint } => {
            assert!(errors[0].contains("experiment"));
            assert_eq!(
                hint.as_deref(),
                Some("git branch -m experiment/x <type>/<description>")
            );
        }
        other => panic!("expected invalid verdict, got {other:?}"),
    }

    git(temp.path(), &["checkout", "--quiet", "--detach"]).await;
    assert!(matches!(
        gate.constrains(POST_CHECKOUT, None, None).await,
        Verdict::Valid { notice: Some(_) }
    ));
}

// =============================================================================
// commit-msg
// =============================================================================

#[tokio::test]
async fn commit_msg_corrects_commit_editmsg() {
    if !git_available() {
        return;
    }
    let temp = temp_dir();
    init_repo(temp.path()).await;
    let mut config = ProjectConfig::default_policy();
    if let Some(rule) = config.hooks.get_mut(COMMIT_MSG) {
        rule.constraints.auto_start_with = Some(": ".to_string());
    }

    let editmsg = temp.path().join(".git/COMMIT_EDITMSG");
    std::fs::write(&editmsg, "[FIX]handle empty input\n").unwrap();

    let shell = ShellGit::new();
    let verdict = Gate::new(&shell, &config, temp.path())
        .constrains(COMMIT_MSG, Some("[FIX]handle empty input\n"), None)
        .await;

    assert_eq!(
        verdict,
        Verdict::Corrected {
            message: "[FIX]: handle empty input".to_string()
        }
    );
    assert_eq!(
        std::fs::read_to_string(editmsg).unwrap(),
        "[FIX]: handle empty input\n"
    );
}

// =============================================================================
// pre-push
// =============================================================================

#[tokio::test]
async fn pre_push_detects_remote_ahead() {
    if !git_available() {
        return;
    }
    let temp = temp_dir();
    let (_remote, local, other) = remote_with_two_clones(temp.path()).await;
    let config = ProjectConfig::default_policy();
    let shell = ShellGit::new();
    let gate = Gate::new(&shell, &config, &local);

    assert_eq!(gate.constrains(PRE_PUSH, None, None).await, Verdict::valid());

    commit(&other, "[UPDATE]: remote work").await;
    git(&other, &["push", "--quiet", "origin", "main"]).await;

    match gate.constrains(PRE_PUSH, None, None).await {
        Verdict::Invalid { errors, hint } => {
            assert_eq!(
                errors,
                vec!["La branche distante origin/main contient 1 commit(s) absent(s) en local"]
            );
            assert_eq!(hint.as_deref(), Some("git pull"));
        }
        other => panic!("expected invalid verdict, got {other:?}"),
    }

    std::fs::write(local.join("wip.txt"), "draft").unwrap();
    match gate.constrains(PRE_PUSH, None, None).await {
        Verdict::Invalid { hint, .. } => {
            assert_eq!(hint.as_deref(), Some("git stash && git pull && git stash pop"));
        }
        other => panic!("expected invalid verdict, got {other:?}"),
    }
}

#[tokio::test]
async fn pre_push_accepts_new_branch() {
    if !git_available() {
        return;
    }
    let temp = temp_dir();
    let (_remote, local, _other) = remote_with_two_clones(temp.path()).await;
    git(&local, &["checkout", "--quiet", "-b", "feat/new"]).await;

    let config = ProjectConfig::default_policy();
    let shell = ShellGit::new();
    let verdict = Gate::new(&shell, &config, &local)
        .constrains(PRE_PUSH, None, None)
        .await;
    assert!(matches!(verdict, Verdict::Valid { notice: Some(_) }));
}
