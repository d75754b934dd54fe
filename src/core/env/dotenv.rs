// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! `.env` file reading and writing.
//!
//! Parsing follows `dotenvy`: `export` prefixes, quoting, escapes, inline
//! comments and `$VAR` substitution. Malformed lines are reported by number
//! and skipped.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{ConfigError, GuardResult};

/// Result of parsing a `.env` document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedEnv {
    pub values: BTreeMap<String, String>,
    /// 1-based numbers of malformed lines.
    pub ignored_lines: Vec<usize>,
}

/// Parses `.env` content.
#[must_use]
pub fn parse_env(content: &str) -> ParsedEnv {
    let mut parsed = ParsedEnv::default();
    // Malformed lines are located in order, so repeated garbage maps to
    // successive line numbers.
    let mut cursor = 0;
    for item in dotenvy::from_read_iter(content.as_bytes()) {
        match item {
            Ok((key, value)) => {
                parsed.values.insert(key, value);
            }
            Err(dotenvy::Error::LineParse(line, _)) => {
                let number = content
                    .lines()
                    .enumerate()
                    .skip(cursor)
                    .find(|(_, raw)| raw.trim() == line.trim())
                    .map_or(cursor + 1, |(index, _)| index + 1);
                cursor = number;
                parsed.ignored_lines.push(number);
            }
            Err(e) => warn!(error = %e, "Ligne .env illisible"),
        }
    }
    parsed
}

/// Loads the variables defined in `path`.
///
/// A missing file yields an empty map and a warning.
///
/// # Errors
///
/// Returns `ConfigError::ReadError` if the file exists but cannot be read.
pub fn load_env_file(path: &Path) -> GuardResult<BTreeMap<String, String>> {
    if !path.exists() {
        warn!(path = %path.display(), "Fichier .env non trouvé");
        return Ok(BTreeMap::new());
    }
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.display().to_string(),
        source,
    })?;
    let parsed = parse_env(&content);
    for line in &parsed.ignored_lines {
        warn!(path = %path.display(), "Ligne {line} ignorée (format invalide)");
    }
    info!(
        path = %path.display(),
        count = parsed.values.len(),
        "Variables d'environnement chargées"
    );
    Ok(parsed.values)
}

/// Sets `key=value` in `path`, updating an existing assignment or appending one.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read or written.
pub fn save_env_var(path: &Path, key: &str, value: &str) -> GuardResult<()> {
    let existing = if path.exists() {
        std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.display().to_string(),
            source,
        })?
    } else {
        String::new()
    };

    let assignment = format!("{key}={value}");
    let mut replaced = false;
    let mut lines: Vec<String> = existing
        .lines()
        .map(|line| {
            let is_target = line
                .split_once('=')
                .is_some_and(|(k, _)| k.trim() == key && !line.trim_start().starts_with('#'));
            if is_target && !replaced {
                replaced = true;
                assignment.clone()
            } else {
                line.to_string()
            }
        })
        .collect();
    if !replaced {
        lines.push(assignment);
    }

    let mut content = lines.join("\n");
    content.push('\n');
    std::fs::write(path, content).map_err(|source| ConfigError::WriteError {
        path: path.display().to_string(),
        source,
    })?;
    debug!(path = %path.display(), "Variable {key} sauvegardée");
    Ok(())
}
