// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Writes the shell scripts git runs for each hook.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use super::COMMIT_MSG;
use crate::error::{GuardError, GuardResult};

/// Hooks written and hooks left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookInstallReport {
    pub installed: Vec<String>,
    pub skipped: Vec<String>,
}

/// Script body for `hook`.
#[must_use]
pub fn hook_script(hook: &str) -> String {
    let file_arg = if hook == COMMIT_MSG { " \"$1\"" } else { "" };
    format!(
        "#!/bin/sh\n# PushGuardian {hook} hook\npushguardian validate --hooks {hook}{file_arg} || exit 1\n"
    )
}

/// Installs `hooks` into `<repo_root>/.git/hooks`. Existing scripts are kept
/// unless `force` is set.
///
/// # Errors
///
/// Fails if `.git/hooks` does not exist or a script cannot be written.
pub fn install_hooks<S: AsRef<str>>(
    repo_root: &Path,
    hooks: &[S],
    force: bool,
) -> GuardResult<HookInstallReport> {
    let hooks_dir = repo_root.join(".git").join("hooks");
    if !hooks_dir.is_dir() {
        return Err(GuardError::other(format!(
            "Dossier {} introuvable: ce projet n'est pas un dépôt Git",
            hooks_dir.display()
        )));
    }

    let mut report = HookInstallReport::default();
    for hook in hooks.iter().map(AsRef::as_ref) {
        let path = hooks_dir.join(hook);
        if path.exists() && !force {
            warn!("Le hook {hook} existe déjà (utilisez --force pour l'écraser)");
            report.skipped.push(hook.to_string());
            continue;
        }
        fs::write(&path, hook_script(hook))?;
        make_executable(&path)?;
        info!("Hook {hook} installé");
        report.installed.push(hook.to_string());
    }
    Ok(report)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
