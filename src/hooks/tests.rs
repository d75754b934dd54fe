// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use tempfile::TempDir;

use super::branch::{BranchName, check_branch, validate_branch_name};
use super::commit_msg::check_commit_message;
use super::install::hook_script;
use super::*;
use crate::config::{Constraints, HookRule, OnMissing, ProjectConfig, ValidateConfig};
use crate::error::{GitError, GuardResult};
use crate::git::VcsRunner;

/// Answers git invocations from a script keyed by the joined arguments.
#[derive(Default)]
struct ScriptedGit {
    answers: BTreeMap<String, Result<String, String>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedGit {
    fn ok(mut self, args: &str, stdout: &str) -> Self {
        self.answers.insert(args.to_string(), Ok(stdout.to_string()));
        self
    }

    fn fail(mut self, args: &str, message: &str) -> Self {
        self.answers
            .insert(args.to_string(), Err(message.to_string()));
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl VcsRunner for ScriptedGit {
    async fn run(&self, args: &[&str], _cwd: &Path) -> GuardResult<String> {
        let key = args.join(" ");
        self.calls.lock().unwrap().push(key.clone());
        match self.answers.get(&key) {
            Some(Ok(stdout)) => Ok(stdout.clone()),
            Some(Err(message)) => Err(GitError::CommandFailed {
                command: format!("git {key}"),
                message: message.clone(),
            }
            .into()),
            None => panic!("unexpected git call: {key}"),
        }
    }
}

fn rule(types: &[&str], constraints: Constraints) -> HookRule {
    HookRule {
        allowed_types: types.iter().map(ToString::to_string).collect(),
        constraints,
    }
}

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

// =============================================================================
// Verdict
// =============================================================================

#[test]
fn test_verdict_exit_codes() {
    assert_eq!(Verdict::valid().exit_code(), 0);
    assert_eq!(Verdict::notice("x").exit_code(), 0);
    assert_eq!(
        Verdict::Corrected {
            message: "m".to_string()
        }
        .exit_code(),
        0
    );
    assert_eq!(Verdict::invalid(vec!["e".to_string()]).exit_code(), 1);
}

// =============================================================================
// commit-msg
// =============================================================================

#[test]
fn test_commit_message_accepted() {
    let result = validate_commit_message(
        "[feat]: add new feature",
        &rule(&["feat", "fix"], Constraints::default()),
    );
    assert!(result.is_valid);
    assert!(result.errors.is_empty());
    assert_eq!(result.commit_type.as_deref(), Some("feat"));
    assert_eq!(result.description.as_deref(), Some("add new feature"));
}

#[test]
fn test_commit_message_rejects_unknown_type() {
    let result = validate_commit_message(
        "[chore]: y",
        &rule(&["feat", "fix"], Constraints::default()),
    );
    assert!(!result.is_valid);
    insta::assert_snapshot!(result.errors.join("\n"), @r#"Le type "chore" n'est pas valide. Types autorisés: feat, fix"#);
}

#[test]
fn test_commit_message_any_type_when_list_empty() {
    let result = validate_commit_message("[anytype]: add", &rule(&[], Constraints::default()));
    assert!(result.is_valid);
}

#[test]
fn test_commit_message_rejects_bad_format() {
    for message in ["feat add new feature", "message sans format", "", "[]: x"] {
        let result = validate_commit_message(message, &rule(&["feat"], Constraints::default()));
        assert!(!result.is_valid, "{message:?}");
        assert_eq!(result.commit_type, None);
        assert_eq!(result.errors.len(), 1);
    }
}

#[test]
fn test_commit_message_length_constraints() {
    let constraints = Constraints {
        min_length: Some(100),
        max_length: Some(10),
        ..Constraints::default()
    };
    let result = validate_commit_message("[feat]: short msg", &rule(&["feat"], constraints));
    assert_eq!(result.errors.len(), 2);
    assert!(result.errors[0].contains("au moins 100"));
    assert!(result.errors[1].contains("dépasser 10"));

    let result = validate_commit_message(
        "[feat]: this is a long enough message",
        &rule(
            &["feat"],
            Constraints {
                min_length: Some(10),
                ..Constraints::default()
            },
        ),
    );
    assert!(result.is_valid);
}

#[test]
fn test_commit_message_custom_separator() {
    let constraints = Constraints {
        must_start_with: Some(" - ".to_string()),
        ..Constraints::default()
    };
    let ok = validate_commit_message("[fix] - typo", &rule(&[], constraints.clone()));
    assert!(ok.is_valid);
    assert_eq!(ok.description.as_deref(), Some("typo"));

    let missing = validate_commit_message("[fix]: typo", &rule(&[], constraints));
    assert!(missing.separator_missing);
    assert_eq!(missing.errors, vec![r#"Le type doit être suivi de " - ""#]);
}

#[test]
fn test_commit_message_checks_first_line_only() {
    let result = validate_commit_message(
        "[feat]: subject\n\nbody mentioning [other] things",
        &rule(&["feat"], Constraints::default()),
    );
    assert!(result.is_valid);
    assert_eq!(result.description.as_deref(), Some("subject"));
}

fn auto_rule() -> HookRule {
    rule(
        &["feat"],
        Constraints {
            auto_start_with: Some(": ".to_string()),
            ..Constraints::default()
        },
    )
}

#[tokio::test]
async fn test_commit_message_auto_correction_rewrites_file() {
    let temp = temp_dir();
    let file = temp.path().join("COMMIT_EDITMSG");
    std::fs::write(&file, "[feat]no separator here\n").unwrap();
    let git = ScriptedGit::default();

    let verdict = check_commit_message(
        &git,
        temp.path(),
        "[feat]no separator here\n",
        Some(&file),
        &auto_rule(),
    )
    .await;

    assert_eq!(
        verdict,
        Verdict::Corrected {
            message: "[feat]: no separator here".to_string()
        }
    );
    assert_eq!(
        std::fs::read_to_string(&file).unwrap(),
        "[feat]: no separator here\n"
    );
    assert!(git.calls().is_empty());
}

#[tokio::test]
async fn test_commit_message_auto_correction_locates_git_dir() {
    let temp = temp_dir();
    let git_dir = temp.path().join(".git");
    std::fs::create_dir_all(&git_dir).unwrap();
    std::fs::write(git_dir.join("COMMIT_EDITMSG"), "[feat]x\n\nbody\n").unwrap();
    let git = ScriptedGit::default().ok("rev-parse --git-dir", ".git");

    let verdict =
        check_commit_message(&git, temp.path(), "[feat]x\n\nbody\n", None, &auto_rule()).await;

    assert!(matches!(verdict, Verdict::Corrected { .. }));
    assert_eq!(
        std::fs::read_to_string(git_dir.join("COMMIT_EDITMSG")).unwrap(),
        "[feat]: x\n\nbody\n"
    );
}

#[tokio::test]
async fn test_commit_message_auto_correction_without_file() {
    let temp = temp_dir();
    let git = ScriptedGit::default().ok("rev-parse --git-dir", ".git");

    let verdict = check_commit_message(&git, temp.path(), "[feat]x", None, &auto_rule()).await;

    match verdict {
        Verdict::Invalid { hint, .. } => {
            assert_eq!(hint.as_deref(), Some("git commit --amend"));
        }
        other => panic!("expected invalid verdict, got {other:?}"),
    }
}

#[tokio::test]
async fn test_commit_message_auto_correction_git_error_is_fatal() {
    let temp = temp_dir();
    let git = ScriptedGit::default().fail("rev-parse --git-dir", "not a git repository");

    let verdict = check_commit_message(&git, temp.path(), "[feat]x", None, &auto_rule()).await;
    assert!(!verdict.is_success());
}

#[tokio::test]
async fn test_commit_message_rejected_type_leaves_file_untouched() {
    let temp = temp_dir();
    let file = temp.path().join("MSG");
    std::fs::write(&file, "[chore]x\n").unwrap();
    let git = ScriptedGit::default();
    let verdict =
        check_commit_message(&git, temp.path(), "[chore]x", Some(&file), &auto_rule()).await;

    match verdict {
        Verdict::Invalid { errors, .. } => {
            assert_eq!(errors.len(), 2);
            assert!(errors[0].contains("chore"));
            assert!(errors[1].contains("suivi de"));
        }
        other => panic!("expected invalid verdict, got {other:?}"),
    }
    assert_eq!(std::fs::read_to_string(&file).unwrap(), "[chore]x\n");
}

#[tokio::test]
async fn test_commit_message_too_long_is_not_corrected() {
    let temp = temp_dir();
    let file = temp.path().join("MSG");
    let message = format!("[feat]{}", "x".repeat(120));
    std::fs::write(&file, format!("{message}\n")).unwrap();
    let git = ScriptedGit::default();
    let mut rule = auto_rule();
    rule.constraints.max_length = Some(80);

    let verdict = check_commit_message(&git, temp.path(), &message, Some(&file), &rule).await;
    assert!(!verdict.is_success());
    assert_eq!(
        std::fs::read_to_string(&file).unwrap(),
        format!("{message}\n")
    );
}

// =============================================================================
// post-checkout
// =============================================================================

#[test]
fn test_branch_name_parsing() {
    assert_eq!(
        BranchName::parse("feat/login-page"),
        BranchName {
            branch_type: "feat",
            description: "login-page"
        }
    );
    assert_eq!(BranchName::parse("main").description, "");
    assert_eq!(BranchName::parse("fix/a/b").description, "a/b");
}

#[test]
fn test_validate_branch_name() {
    let rule = rule(&["main", "feat"], Constraints::default());
    assert!(validate_branch_name("main", &rule).is_empty());
    assert!(validate_branch_name("feat/x", &rule).is_empty());
    let errors = validate_branch_name("wip/x", &rule);
    insta::assert_snapshot!(errors[0], @r#"Le type de branche "wip" n'est pas valide. Types autorisés: main, feat"#);
}

#[tokio::test]
async fn test_check_branch_git_error_is_not_fatal() {
    let git = ScriptedGit::default().fail("rev-parse --abbrev-ref HEAD", "fatal: bad HEAD");
    let verdict = check_branch(&git, Path::new("."), &rule(&["main"], Constraints::default())).await;
    assert_eq!(verdict, Verdict::notice("Erreur Git, validation ignorée"));
}

#[tokio::test]
async fn test_check_branch_rejects_type() {
    let git = ScriptedGit::default().ok("rev-parse --abbrev-ref HEAD", "oops/thing");
    let verdict = check_branch(&git, Path::new("."), &rule(&["feat"], Constraints::default())).await;
    assert!(!verdict.is_success());
}

// =============================================================================
// pre-push
// =============================================================================

fn pre_push_git() -> ScriptedGit {
    ScriptedGit::default()
        .ok("rev-parse --abbrev-ref HEAD", "feat/x")
        .ok("ls-remote --heads origin feat/x", "abc\trefs/heads/feat/x")
        .ok("fetch --quiet origin feat/x", "")
}

fn policy() -> ProjectConfig {
    ProjectConfig::default_policy()
}

#[tokio::test]
async fn test_pre_push_new_branch_passes_immediately() {
    let git = ScriptedGit::default()
        .ok("rev-parse --abbrev-ref HEAD", "feat/new")
        .ok("ls-remote --heads origin feat/new", "");
    let config = policy();
    let verdict = Gate::new(&git, &config, ".")
        .constrains(PRE_PUSH, None, None)
        .await;

    assert!(matches!(verdict, Verdict::Valid { notice: Some(_) }));
    assert_eq!(git.calls().len(), 2);
}

#[tokio::test]
async fn test_pre_push_behind_with_clean_tree() {
    let git = pre_push_git()
        .ok("rev-list --count HEAD..origin/feat/x", "3")
        .ok("status --porcelain", "");
    let config = policy();
    let verdict = Gate::new(&git, &config, ".")
        .constrains(PRE_PUSH, None, None)
        .await;

    match verdict {
        Verdict::Invalid { errors, hint } => {
            assert!(errors[0].contains("3 commit(s)"));
            assert_eq!(hint.as_deref(), Some("git pull"));
        }
        other => panic!("expected invalid verdict, got {other:?}"),
    }
}

#[tokio::test]
async fn test_pre_push_behind_with_local_changes() {
    let git = pre_push_git()
        .ok("rev-list --count HEAD..origin/feat/x", "1")
        .ok("status --porcelain", " M src/lib.rs");
    let config = policy();
    let verdict = Gate::new(&git, &config, ".")
        .constrains(PRE_PUSH, None, None)
        .await;

    match verdict {
        Verdict::Invalid { hint, .. } => {
            assert_eq!(hint.as_deref(), Some("git stash && git pull && git stash pop"));
        }
        other => panic!("expected invalid verdict, got {other:?}"),
    }
}

#[tokio::test]
async fn test_pre_push_fetch_failure_does_not_block() {
    let git = ScriptedGit::default()
        .ok("rev-parse --abbrev-ref HEAD", "main")
        .ok("ls-remote --heads origin main", "abc\trefs/heads/main")
        .fail("fetch --quiet origin main", "Could not resolve host");
    let config = policy();
    let verdict = Gate::new(&git, &config, ".")
        .constrains(PRE_PUSH, None, None)
        .await;
    assert_eq!(verdict, Verdict::valid());
}

#[tokio::test]
async fn test_pre_push_runs_code_validation_last() {
    let temp = temp_dir();
    std::fs::create_dir_all(temp.path().join("src")).unwrap();
    let git = pre_push_git()
        .ok("rev-list --count HEAD..origin/feat/x", "0");
    let mut config = policy();
    config.validate.activate_cqt = true;
    config.validate.directories = vec!["src".to_string()];

    let verdict = Gate::new(&git, &config, temp.path())
        .with_code_validator(CodeValidator::new(temp.path()).with_program("false"))
        .constrains(PRE_PUSH, None, None)
        .await;
    assert!(!verdict.is_success());
}

// =============================================================================
// Dispatch
// =============================================================================

#[tokio::test]
async fn test_dispatch_without_rule_is_permissive() {
    let git = ScriptedGit::default();
    let config = ProjectConfig::default();
    let gate = Gate::new(&git, &config, ".");
    for hook in DEFAULT_HOOKS {
        assert_eq!(gate.constrains(hook, Some("anything"), None).await, Verdict::valid());
    }
    assert!(git.calls().is_empty());
}

#[tokio::test]
async fn test_dispatch_commit_msg() {
    let git = ScriptedGit::default();
    let mut config = ProjectConfig::default();
    config
        .hooks
        .insert(COMMIT_MSG.to_string(), rule(&["feat", "fix"], Constraints::default()));
    let gate = Gate::new(&git, &config, ".");

    assert!(gate
        .constrains(COMMIT_MSG, Some("[feat]: add new feature"), None)
        .await
        .is_success());
    assert!(!gate
        .constrains(COMMIT_MSG, Some("[invalid]: bad message"), None)
        .await
        .is_success());
    assert!(!gate.constrains(COMMIT_MSG, None, None).await.is_success());
}

// =============================================================================
// Code validator
// =============================================================================

fn validate_config(dirs: &[&str]) -> ValidateConfig {
    ValidateConfig {
        directories: dirs.iter().map(ToString::to_string).collect(),
        on_missing: OnMissing::Ignore,
        activate_cqt: true,
        config: None,
    }
}

#[test]
fn test_code_validator_args() {
    let temp = temp_dir();
    std::fs::create_dir_all(temp.path().join("src")).unwrap();
    std::fs::create_dir_all(temp.path().join("tests")).unwrap();
    let validator = CodeValidator::new(temp.path());

    let mut config = validate_config(&["src", "nonexistent", "tests"]);
    config.config = Some(".eslintrc.custom.js".to_string());
    let args = validator
        .args(
            &config,
            CodeCheckOptions {
                fix: true,
                strict: true,
                silent: false,
            },
        )
        .unwrap();
    assert_eq!(
        args,
        vec![
            "eslint",
            "src",
            "tests",
            "--fix",
            "--max-warnings=0",
            "--config",
            ".eslintrc.custom.js"
        ]
    );
    assert!(validator
        .args(&validate_config(&["missing"]), CodeCheckOptions::default())
        .is_none());
}

#[tokio::test]
async fn test_code_validator_disabled_runs_nothing() {
    let validator = CodeValidator::new(".").with_program("definitely-not-a-real-program");
    let mut config = validate_config(&["."]);
    config.activate_cqt = false;
    let result = validator.validate(&config, CodeCheckOptions::default()).await;
    assert!(result.success);
}

#[tokio::test]
async fn test_code_validator_missing_directories() {
    let temp = temp_dir();
    let validator = CodeValidator::new(temp.path()).with_program("false");

    let ignored = validator
        .validate(&validate_config(&["a", "b"]), CodeCheckOptions::default())
        .await;
    assert_eq!(ignored, CodeValidation { success: true, errors: vec![] });

    let mut strict = validate_config(&["a"]);
    strict.on_missing = OnMissing::Error;
    let failed = validator.validate(&strict, CodeCheckOptions::default()).await;
    assert!(!failed.success);
}

#[tokio::test]
async fn test_code_validator_reports_tool_output() {
    let temp = temp_dir();
    std::fs::create_dir_all(temp.path().join("src")).unwrap();
    let config = validate_config(&["src"]);

    let passing = CodeValidator::new(temp.path()).with_program("true");
    assert!(passing.validate(&config, CodeCheckOptions::default()).await.success);

    let failing = CodeValidator::new(temp.path()).with_program("false");
    let result = failing.validate(&config, CodeCheckOptions::default()).await;
    assert!(!result.success);
    assert_eq!(result.errors, vec!["false a échoué avec le code 1"]);

    let missing = CodeValidator::new(temp.path()).with_program("definitely-not-a-real-program");
    let result = missing.validate(&config, CodeCheckOptions::default()).await;
    assert!(!result.success);
    insta::assert_snapshot!(
        result.errors.join("\n"),
        @"executable not found: 'definitely-not-a-real-program' (not in PATH)"
    );
}

// =============================================================================
// Install
// =============================================================================

#[test]
fn test_hook_scripts() {
    insta::assert_snapshot!(hook_script(COMMIT_MSG), @r#"
    #!/bin/sh
    # PushGuardian commit-msg hook
    pushguardian validate --hooks commit-msg "$1" || exit 1
    "#);
    assert!(hook_script(PRE_PUSH).contains("validate --hooks pre-push || exit 1"));
}

#[test]
fn test_install_hooks_skips_existing_unless_forced() {
    let temp = temp_dir();
    let hooks_dir = temp.path().join(".git/hooks");
    std::fs::create_dir_all(&hooks_dir).unwrap();
    std::fs::write(hooks_dir.join(PRE_PUSH), "custom").unwrap();

    let report = install_hooks(temp.path(), &DEFAULT_HOOKS, false).unwrap();
    assert_eq!(report.installed, vec![COMMIT_MSG, POST_CHECKOUT]);
    assert_eq!(report.skipped, vec![PRE_PUSH]);
    assert_eq!(std::fs::read_to_string(hooks_dir.join(PRE_PUSH)).unwrap(), "custom");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(hooks_dir.join(COMMIT_MSG))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    let forced = install_hooks(temp.path(), &[PRE_PUSH], true).unwrap();
    assert_eq!(forced.installed, vec![PRE_PUSH]);
    assert_eq!(
        std::fs::read_to_string(hooks_dir.join(PRE_PUSH)).unwrap(),
        hook_script(PRE_PUSH)
    );
}

#[test]
fn test_install_hooks_requires_git_directory() {
    let temp = temp_dir();
    let err = install_hooks(temp.path(), &DEFAULT_HOOKS, false).unwrap_err();
    assert!(err.to_string().contains(".git"));
}
