// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use serde_json::Value;
use tempfile::TempDir;

use super::install::{run_install_command, select_platforms};
use super::mirror::{MISSING_ENDPOINTS, build_job, run_mirror_command};
use crate::cli::install::InstallArgs;
use crate::cli::mirror::MirrorArgs;
use crate::config::{ProjectConfig, Settings};
use crate::error::{GuardResult, MirrorError};
use crate::menu::{Chooser, Preselected};
use crate::mirror::Platform;

/// Chooser that always answers with fixed indices.
struct Answer(Vec<usize>);

impl Chooser for Answer {
    fn choose(&self, _: &str, _: &[&str], _: &[usize]) -> GuardResult<Vec<usize>> {
        Ok(self.0.clone())
    }
}

fn git_project() -> TempDir {
    let temp = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(temp.path().join(".git/hooks")).unwrap();
    temp
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn full_args() -> MirrorArgs {
    MirrorArgs {
        source: Some("github".to_string()),
        target: Some("gitlab".to_string()),
        source_repo: Some("repo-a".to_string()),
        target_repo: Some("repo-a-mirror".to_string()),
        source_owner: Some("myorg".to_string()),
        target_owner: Some("myorg".to_string()),
        sync_branches: true,
        ..MirrorArgs::default()
    }
}

// =============================================================================
// mirror
// =============================================================================

#[test]
fn test_build_job() {
    let job = build_job(&full_args()).unwrap();
    assert_eq!(job.source_platform, Platform::GitHub);
    assert_eq!(job.target_platform, Platform::GitLab);
    assert!(job.sync_branches);
    assert!(!job.make_public);
}

#[test]
fn test_build_job_errors() {
    let missing = MirrorArgs {
        target_owner: None,
        ..full_args()
    };
    assert_eq!(build_job(&missing).unwrap_err().to_string(), MISSING_ENDPOINTS);

    let unknown = MirrorArgs {
        target: Some("sourceforge".to_string()),
        ..full_args()
    };
    let err = build_job(&unknown).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<MirrorError>(),
        Some(MirrorError::UnsupportedPlatform(p)) if p == "sourceforge"
    ));
}

#[tokio::test]
async fn test_mirror_requires_configuration() {
    let temp = tempfile::tempdir().unwrap();
    let err = run_mirror_command(&full_args(), &Settings::default(), temp.path())
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<MirrorError>(),
        Some(MirrorError::ConfigurationMissing(_))
    ));
}

#[tokio::test]
async fn test_mirror_generate_skips_configuration() {
    let temp = tempfile::tempdir().unwrap();
    let args = MirrorArgs {
        generate: true,
        ..MirrorArgs::default()
    };
    run_mirror_command(&args, &Settings::default(), temp.path())
        .await
        .unwrap();
    assert!(temp.path().join(".github/workflows/mirror.yml").is_file());
}

// =============================================================================
// install
// =============================================================================

#[test]
fn test_install_hooks_writes_default_policy() {
    let temp = git_project();
    let args = InstallArgs {
        hooks: true,
        ..InstallArgs::default()
    };
    run_install_command(&args, &Settings::default(), temp.path(), &Preselected).unwrap();

    for hook in ["commit-msg", "post-checkout", "pre-push"] {
        assert!(temp.path().join(".git/hooks").join(hook).is_file());
    }
    let config = ProjectConfig::load(&temp.path().join("pushguardian.config.json")).unwrap();
    assert!(config.hook_rule("commit-msg").is_some());
    assert_eq!(config.install.map(|i| i.hooks), Some(true));
    assert!(config.mirroring.is_none());
}

#[test]
fn test_install_keeps_existing_policy_and_unknown_keys() {
    let temp = git_project();
    let path = temp.path().join("pushguardian.config.json");
    std::fs::write(&path, r#"{"custom": {"keep": true}, "hooks": {}}"#).unwrap();

    let args = InstallArgs {
        all: true,
        platforms: vec!["azure".to_string(), "github".to_string()],
        ..InstallArgs::default()
    };
    run_install_command(&args, &Settings::default(), temp.path(), &Preselected).unwrap();

    let document = read_json(&path);
    assert_eq!(document["custom"]["keep"], Value::Bool(true));
    assert_eq!(document["hooks"], serde_json::json!({}));
    assert_eq!(document["install"], serde_json::json!({"hooks": true, "mirroring": true}));
    insta::assert_snapshot!(serde_json::to_string_pretty(&document["mirroring"]).unwrap(), @r#"
    {
      "defaultSettings": {
        "autoSync": false,
        "includeBranches": true,
        "includeTags": true,
        "syncInterval": 24
      },
      "enabled": true,
      "platforms": {
        "azure": {
          "enabled": true
        },
        "bitbucket": {
          "enabled": false
        },
        "github": {
          "enabled": true
        },
        "gitlab": {
          "enabled": false
        }
      }
    }
    "#);
}

#[test]
fn test_install_mirroring_uses_chooser_and_file() {
    let temp = tempfile::tempdir().unwrap();
    let args = InstallArgs {
        mirroring: true,
        file: Some("custom.json".into()),
        ..InstallArgs::default()
    };
    run_install_command(&args, &Settings::default(), temp.path(), &Answer(vec![2])).unwrap();

    let config = ProjectConfig::load(&temp.path().join("custom.json")).unwrap();
    let mirroring = config.mirroring.unwrap();
    assert!(mirroring.is_enabled("bitbucket"));
    assert!(!mirroring.is_enabled("github"));
    assert!(!temp.path().join("pushguardian.config.json").exists());
}

#[test]
fn test_install_hooks_outside_git_fails() {
    let temp = tempfile::tempdir().unwrap();
    let args = InstallArgs {
        hooks: true,
        ..InstallArgs::default()
    };
    assert!(run_install_command(&args, &Settings::default(), temp.path(), &Preselected).is_err());
}

#[test]
fn test_select_platforms() {
    assert_eq!(
        select_platforms(&[], &Preselected).unwrap(),
        vec![Platform::GitHub, Platform::GitLab]
    );
    let names = vec!["gitlab".to_string(), "GitHub".to_string(), "gitlab".to_string()];
    assert_eq!(
        select_platforms(&names, &Preselected).unwrap(),
        vec![Platform::GitHub, Platform::GitLab]
    );
    assert!(select_platforms(&["nope".to_string()], &Preselected).is_err());
}
