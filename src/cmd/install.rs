// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! `install` command.
//!
//! ```text
//! hooks         .git/hooks/<hook> scripts, default policy if absent,
//!               install.hooks = true
//! code-quality  reported as unsupported
//! mirroring     platforms from --platforms or the chooser,
//!               mirroring section + install.mirroring = true
//! ```
//!
//! The policy file is merged, never overwritten.

use std::path::Path;

use serde_json::json;
use tracing::info;

use crate::cli::install::InstallArgs;
use crate::config::{
    DefaultSettings, MirroringConfig, PlatformToggle, ProjectConfig, Settings, save_value_merged,
};
use crate::error::Result;
use crate::hooks::install_hooks;
use crate::menu::Chooser;
use crate::mirror::Platform;

/// Platforms preselected in the menu: GitHub and GitLab.
const PRESELECTED_PLATFORMS: [usize; 2] = [0, 1];

/// Main handler for the install command.
///
/// # Errors
///
/// Returns an error if the project is not a Git repository, a hook or the
/// policy file cannot be written, or a platform name is unknown.
pub fn run_install_command(
    args: &InstallArgs,
    settings: &Settings,
    root: &Path,
    chooser: &dyn Chooser,
) -> Result<()> {
    let config_path = args
        .file
        .as_ref()
        .map_or_else(|| root.join(&settings.config_path), |file| root.join(file));
    let steps = args.steps();

    if steps.hooks {
        install_hook_step(args, root, &config_path)?;
    }
    if steps.code_quality {
        println!("⚠️  La configuration des outils de qualité de code n'est pas prise en charge");
    }
    if steps.mirroring {
        let platforms = select_platforms(&args.platforms, chooser)?;
        install_mirroring(&config_path, &platforms)?;
        let names: Vec<&str> = platforms.iter().map(|p| p.label()).collect();
        println!("✅ Mise en miroir configurée: {}", names.join(", "));
        println!("💡 Renseignez les identifiants des plateformes dans {}", settings.env_file.display());
    }
    Ok(())
}

fn install_hook_step(args: &InstallArgs, root: &Path, config_path: &Path) -> Result<()> {
    let hooks = args.hook_list();
    let report = install_hooks(root, hooks.as_slice(), args.force)?;
    for hook in &report.installed {
        println!("✅ Hook {hook} installé");
    }
    for hook in &report.skipped {
        println!("⚠️  Hook {hook} déjà présent, ignoré (utilisez --force)");
    }

    if ProjectConfig::write_default_if_missing(config_path)? {
        println!("✅ Configuration créée: {}", config_path.display());
    }
    save_value_merged(config_path, json!({ "install": { "hooks": true } }))?;
    Ok(())
}

/// Platforms named on the command line, or picked from the menu.
///
/// # Errors
///
/// Fails on an unknown platform name or a chooser error.
pub fn select_platforms(names: &[String], chooser: &dyn Chooser) -> Result<Vec<Platform>> {
    if !names.is_empty() {
        let mut platforms = names
            .iter()
            .map(|name| name.parse::<Platform>())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        platforms.sort();
        platforms.dedup();
        return Ok(platforms);
    }

    let labels: Vec<&str> = Platform::ALL.iter().map(|p| p.label()).collect();
    let chosen = chooser.choose(
        "Plateformes à activer pour la mise en miroir:",
        &labels,
        &PRESELECTED_PLATFORMS,
    )?;
    Ok(chosen
        .into_iter()
        .filter_map(|index| Platform::ALL.get(index).copied())
        .collect())
}

/// Merges the mirroring section enabling exactly `platforms`.
///
/// # Errors
///
/// Returns an error if the policy file cannot be read or written.
pub fn install_mirroring(config_path: &Path, platforms: &[Platform]) -> Result<()> {
    let mirroring = MirroringConfig {
        enabled: true,
        platforms: Platform::ALL
            .iter()
            .map(|p| {
                let toggle = PlatformToggle {
                    enabled: platforms.contains(p),
                };
                (p.id().to_string(), toggle)
            })
            .collect(),
        default_settings: DefaultSettings::default(),
    };
    save_value_merged(
        config_path,
        json!({
            "mirroring": serde_json::to_value(&mirroring)?,
            "install": { "mirroring": true },
        }),
    )?;
    info!(path = %config_path.display(), "mirroring section saved");
    Ok(())
}
