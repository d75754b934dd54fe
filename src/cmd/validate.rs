// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! `validate` command: the only place a [`Verdict`] becomes an exit code.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use crate::cli::validate::ValidateArgs;
use crate::config::{ProjectConfig, Settings};
use crate::error::Result;
use crate::git::ShellGit;
use crate::hooks::{COMMIT_MSG, CodeValidator, Gate, POST_CHECKOUT, PRE_PUSH, Verdict};

/// Main handler for the validate command. Returns the process exit code.
///
/// # Errors
///
/// Returns an error if the policy file is invalid or the commit message file
/// cannot be read.
pub async fn run_validate_command(
    args: &ValidateArgs,
    settings: &Settings,
    root: &Path,
) -> Result<u8> {
    let config = load_policy(&root.join(&settings.config_path))?;

    let hook = match (&args.hook, &args.message) {
        (Some(hook), _) => Some(hook.as_str()),
        (None, Some(_)) => Some(COMMIT_MSG),
        (None, None) => None,
    };

    let (subject, verdict) = match hook {
        Some(hook) => {
            let (message, commit_file) = resolve_message(args.message.as_deref(), root).await?;
            let git = ShellGit::new();
            let gate = Gate::new(&git, &config, root);
            let verdict = gate
                .constrains(hook, message.as_deref(), commit_file.as_deref())
                .await;
            (subject_for(hook), verdict)
        }
        None => {
            let validation = CodeValidator::new(root)
                .validate(&config.validate, args.code_options())
                .await;
            ("Le code", validation.into())
        }
    };

    let output = format_verdict(subject, &verdict);
    if !verdict.is_success() {
        eprintln!("{output}");
    } else if !args.silent {
        println!("{output}");
    }
    Ok(verdict.exit_code())
}

fn load_policy(path: &Path) -> Result<ProjectConfig> {
    if path.exists() {
        return Ok(ProjectConfig::load(path)?);
    }
    debug!(path = %path.display(), "no policy file, every hook passes");
    Ok(ProjectConfig::default())
}

/// The commit message and, when `arg` names an existing file, that file.
async fn resolve_message(
    arg: Option<&str>,
    root: &Path,
) -> Result<(Option<String>, Option<PathBuf>)> {
    let Some(arg) = arg else {
        return Ok((None, None));
    };
    let candidate = root.join(arg);
    if !candidate.is_file() {
        return Ok((Some(arg.to_string()), None));
    }
    let message = tokio::fs::read_to_string(&candidate)
        .await
        .with_context(|| format!("Impossible de lire {}", candidate.display()))?;
    Ok((Some(message), Some(candidate)))
}

fn subject_for(hook: &str) -> &'static str {
    match hook {
        COMMIT_MSG => "Le message de commit",
        POST_CHECKOUT => "Le nom de branche",
        PRE_PUSH => "Le push",
        _ => "Le hook",
    }
}

/// User-facing rendering of `verdict`.
#[must_use]
pub fn format_verdict(subject: &str, verdict: &Verdict) -> String {
    match verdict {
        Verdict::Valid { notice: None } => format!("✅ {subject} respecte les contraintes"),
        Verdict::Valid {
            notice: Some(notice),
        } => format!("⚠️  {notice}"),
        Verdict::Corrected { message } => {
            format!("✅ Message de commit corrigé automatiquement: {message}")
        }
        Verdict::Invalid { errors, hint } => {
            let mut out = format!("❌ {subject} ne respecte pas les contraintes:");
            for error in errors {
                out.push_str("\n   - ");
                out.push_str(error);
            }
            if let Some(hint) = hint {
                out.push_str("\n💡 Essayez: ");
                out.push_str(hint);
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subjects() {
        assert_eq!(subject_for(COMMIT_MSG), "Le message de commit");
        assert_eq!(subject_for(POST_CHECKOUT), "Le nom de branche");
        assert_eq!(subject_for(PRE_PUSH), "Le push");
        assert_eq!(subject_for("pre-rebase"), "Le hook");
    }

    #[test]
    fn test_format_invalid_verdict() {
        let verdict = Verdict::invalid_with_hint(
            vec![
                "La branche distante origin/main contient 2 commit(s) absent(s) en local"
                    .to_string(),
            ],
            "git pull",
        );
        insta::assert_snapshot!(format_verdict("Le push", &verdict), @r"
        ❌ Le push ne respecte pas les contraintes:
           - La branche distante origin/main contient 2 commit(s) absent(s) en local
        💡 Essayez: git pull
        ");
    }

    #[test]
    fn test_format_success_verdicts() {
        assert_eq!(
            format_verdict("Le code", &Verdict::valid()),
            "✅ Le code respecte les contraintes"
        );
        assert_eq!(
            format_verdict("Le nom de branche", &Verdict::notice("HEAD détachée, validation ignorée")),
            "⚠️  HEAD détachée, validation ignorée"
        );
    }

    #[tokio::test]
    async fn test_resolve_message_prefers_file() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("MSG"), "[feat]: from file\n").unwrap();

        let (message, file) = resolve_message(Some("MSG"), temp.path()).await.unwrap();
        assert_eq!(message.as_deref(), Some("[feat]: from file\n"));
        assert_eq!(file, Some(temp.path().join("MSG")));

        let (message, file) = resolve_message(Some("[fix]: inline"), temp.path())
            .await
            .unwrap();
        assert_eq!(message.as_deref(), Some("[fix]: inline"));
        assert_eq!(file, None);
    }

    #[tokio::test]
    async fn test_commit_message_validation_exit_codes() {
        let temp = tempfile::tempdir().unwrap();
        ProjectConfig::write_default_if_missing(&temp.path().join("pushguardian.config.json"))
            .unwrap();
        let settings = Settings::default();

        let ok = ValidateArgs {
            message: Some("[FIX]: handle empty input".to_string()),
            hook: Some(COMMIT_MSG.to_string()),
            silent: true,
            ..ValidateArgs::default()
        };
        assert_eq!(run_validate_command(&ok, &settings, temp.path()).await.unwrap(), 0);

        let bad = ValidateArgs {
            message: Some("[wip]: nope".to_string()),
            ..ValidateArgs::default()
        };
        assert_eq!(run_validate_command(&bad, &settings, temp.path()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_code_validation_without_policy_passes() {
        let temp = tempfile::tempdir().unwrap();
        let args = ValidateArgs {
            silent: true,
            ..ValidateArgs::default()
        };
        let code = run_validate_command(&args, &Settings::default(), temp.path())
            .await
            .unwrap();
        assert_eq!(code, 0);
    }
}
