// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! `commit-msg` rules.
//!
//! ```text
//! [feat]: add the thing
//!  ^^^^ ^^ ^^^^^^^^^^^^^
//!  type |  description
//!       separator = mustStartWith ?? autoStartWith ?? ": "
//! ```
//!
//! Checks run in order: format, type membership, minimum length, maximum
//! length, separator. A missing separator is fixed in place when
//! `autoStartWith` is set.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use super::Verdict;
use crate::config::HookRule;
use crate::git::VcsRunner;
use crate::git::query::git_dir;

const DEFAULT_SEPARATOR: &str = ": ";

/// Matches the first line: `[type]rest`.
static COMMIT_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\[([^\]\s]+)\](.*)$").ok());

/// Inspectable outcome of the commit message rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitMessageValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub commit_type: Option<String>,
    pub description: Option<String>,
    /// The separator after `[type]` is absent.
    pub separator_missing: bool,
}

fn separator(rule: &HookRule) -> &str {
    rule.constraints
        .must_start_with
        .as_deref()
        .or(rule.constraints.auto_start_with.as_deref())
        .unwrap_or(DEFAULT_SEPARATOR)
}

/// Applies `rule` to `message` without touching the filesystem.
#[must_use]
pub fn validate_commit_message(message: &str, rule: &HookRule) -> CommitMessageValidation {
    let message = message.trim();
    let first_line = message.lines().next().unwrap_or_default();

    let Some(captures) = COMMIT_PATTERN
        .as_ref()
        .and_then(|re| re.captures(first_line))
    else {
        return CommitMessageValidation {
            errors: vec![
                "Le message doit respecter le format [type]: description".to_string(),
            ],
            ..CommitMessageValidation::default()
        };
    };

    let commit_type = captures[1].to_string();
    let rest = &captures[2];
    let mut errors = Vec::new();

    if !rule.allowed_types.is_empty() && !rule.allowed_types.contains(&commit_type) {
        errors.push(format!(
            "Le type \"{commit_type}\" n'est pas valide. Types autorisés: {}",
            rule.allowed_types.join(", ")
        ));
    }

    let length = message.chars().count();
    if let Some(min) = rule.constraints.min_length
        && length < min
    {
        errors.push(format!(
            "Le message doit contenir au moins {min} caractères ({length} actuellement)"
        ));
    }
    if let Some(max) = rule.constraints.max_length
        && length > max
    {
        errors.push(format!(
            "Le message ne doit pas dépasser {max} caractères ({length} actuellement)"
        ));
    }

    let separator = separator(rule);
    let (description, separator_missing) = match rest.strip_prefix(separator) {
        Some(description) => (description, false),
        None => {
            errors.push(format!("Le type doit être suivi de \"{separator}\""));
            (rest, true)
        }
    };

    CommitMessageValidation {
        is_valid: errors.is_empty(),
        errors,
        commit_type: Some(commit_type),
        description: Some(description.trim().to_string()),
        separator_missing,
    }
}

/// Message with the separator inserted after `[type]` on the first line.
fn insert_separator(message: &str, commit_type: &str, separator: &str) -> String {
    let prefix = format!("[{commit_type}]");
    let mut lines = message.trim().lines();
    let first = lines.next().unwrap_or_default();
    let rest = first.strip_prefix(&prefix).unwrap_or(first).trim_start();
    let mut corrected = format!("{prefix}{separator}{rest}");
    for line in lines {
        corrected.push('\n');
        corrected.push_str(line);
    }
    corrected
}

/// Validates `message`, auto-correcting a missing separator when allowed.
///
/// `commit_file` is the message file git handed to the hook; without it the
/// repository's `COMMIT_EDITMSG` is used.
pub async fn check_commit_message(
    git: &dyn VcsRunner,
    cwd: &Path,
    message: &str,
    commit_file: Option<&Path>,
    rule: &HookRule,
) -> Verdict {
    let validation = validate_commit_message(message, rule);
    if validation.is_valid {
        return Verdict::valid();
    }

    // Only a missing separator is repaired; any other error leaves the file as written.
    let auto = rule.constraints.auto_start_with.as_deref();
    let only_separator = validation.separator_missing && validation.errors.len() == 1;
    let (Some(separator), Some(commit_type), true) =
        (auto, validation.commit_type.as_deref(), only_separator)
    else {
        return Verdict::invalid(validation.errors);
    };

    let file = match commit_file {
        Some(file) => file.to_path_buf(),
        None => match git_dir(git, cwd).await {
            Ok(dir) => dir.join("COMMIT_EDITMSG"),
            Err(e) => return Verdict::invalid(vec![format!("Erreur Git: {e}")]),
        },
    };
    auto_correct(&file, message, commit_type, separator, rule)
}

fn auto_correct(
    file: &Path,
    message: &str,
    commit_type: &str,
    separator: &str,
    rule: &HookRule,
) -> Verdict {
    if !file.is_file() {
        debug!(path = %file.display(), "commit message file not found");
        return Verdict::invalid_with_hint(
            vec!["Impossible de trouver le fichier du message de commit".to_string()],
            "git commit --amend",
        );
    }

    let corrected = insert_separator(message, commit_type, separator);
    if let Err(e) = std::fs::write(file, format!("{corrected}\n")) {
        return Verdict::invalid_with_hint(
            vec![format!("Impossible de corriger le message de commit: {e}")],
            "git commit --amend",
        );
    }
    info!("Message de commit corrigé automatiquement: {corrected}");

    let revalidated = validate_commit_message(&corrected, rule);
    if revalidated.is_valid {
        Verdict::Corrected { message: corrected }
    } else {
        Verdict::invalid(revalidated.errors)
    }
}
