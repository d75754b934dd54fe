// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! `mirror` command.
//!
//! ```text
//! --generate --> generate_workflow --> exit
//! policy.mirroring? --no--> ConfigurationMissing
//! endpoints complete? --no--> error
//! .env + process env --> ClientRegistry + CodePusher --> SyncManager::mirror
//! ```

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::debug;

use crate::cli::mirror::MirrorArgs;
use crate::config::{ProjectConfig, Settings};
use crate::core::env::EnvCredentials;
use crate::core::env::dotenv::load_env_file;
use crate::error::{MirrorError, Result};
use crate::git::ShellGit;
use crate::mirror::{
    ClientRegistry, CodePusher, MirrorJob, MirrorReport, Platform, PushOutcome, SyncManager,
    generate_workflow,
};

pub(crate) const MISSING_ENDPOINTS: &str =
    "Plateformes, repos et propriétaires source/cible requis";

/// Main handler for the mirror command.
///
/// # Errors
///
/// Returns an error if the workflow cannot be written, the mirroring
/// configuration or an endpoint parameter is missing, or the mirror job fails.
pub async fn run_mirror_command(args: &MirrorArgs, settings: &Settings, root: &Path) -> Result<()> {
    if args.generate {
        let path = generate_workflow(root)?;
        println!("✅ Workflow GitHub Actions généré: {}", path.display());
        return Ok(());
    }

    let config_path = root.join(&settings.config_path);
    let config = if config_path.exists() {
        Some(ProjectConfig::load(&config_path)?)
    } else {
        None
    };
    let mirroring = config
        .and_then(|config| config.mirroring)
        .filter(|mirroring| mirroring.enabled)
        .ok_or_else(|| {
            MirrorError::ConfigurationMissing(
                "Configuration de mise en miroir manquante".to_string(),
            )
        })?;

    let job = build_job(args)?;

    let env_values = load_env_file(&root.join(&settings.env_file))?;
    let credentials = Arc::new(EnvCredentials::with_fallback(env_values));
    let registry = ClientRegistry::from_config(&mirroring, credentials.as_ref(), &settings.api);
    for skipped in registry.skipped() {
        println!(
            "⚠️  {} désactivé: {}",
            skipped.platform.label(),
            skipped.reason
        );
    }
    debug!(platforms = ?registry.platforms().collect::<Vec<_>>(), "clients ready");

    let pusher = CodePusher::new(Arc::new(ShellGit::new()), credentials)
        .with_git_host(settings.git_host.clone())
        .with_work_dir(root);
    let manager = SyncManager::new(registry, pusher);

    println!(
        "🔄 Mise en miroir {}:{}/{} → {}:{}/{}",
        job.source_platform,
        job.source_owner,
        job.source_repo,
        job.target_platform,
        job.target_owner,
        job.target_repo
    );
    let report = manager
        .mirror(&job)
        .await
        .context("Échec de la mise en miroir")?;
    print_report(&report);
    println!("✅ Mise en miroir terminée avec succès");
    Ok(())
}

/// Builds the job from the command line and its environment fallbacks.
///
/// # Errors
///
/// Fails when a parameter is missing or names an unknown platform.
pub fn build_job(args: &MirrorArgs) -> Result<MirrorJob> {
    let endpoints = args
        .endpoints()
        .ok_or_else(|| anyhow::anyhow!(MISSING_ENDPOINTS))?;
    let source: Platform = endpoints.source.parse()?;
    let target: Platform = endpoints.target.parse()?;

    Ok(MirrorJob::builder()
        .source_platform(source)
        .target_platform(target)
        .source_repo(endpoints.source_repo)
        .target_repo(endpoints.target_repo)
        .source_owner(endpoints.source_owner)
        .target_owner(endpoints.target_owner)
        .sync_branches(args.sync_branches)
        .make_public(args.public_repo)
        .build())
}

fn print_report(report: &MirrorReport) {
    let visibility = if report.repo.private { "privé" } else { "public" };
    println!("📦 Dépôt cible: {} ({visibility})", report.repo.name);

    match &report.push {
        PushOutcome::Pushed(push) => {
            println!("📤 Branches poussées: {}", push.pushed.join(", "));
            for warning in &push.warnings {
                println!("⚠️  {warning}");
            }
        }
        PushOutcome::Skipped(reason) => println!("⏭️  Push du code ignoré: {reason}"),
    }

    if let Some(branches) = &report.branches {
        println!(
            "🌿 Branches synchronisées: {}/{}",
            branches.created.len(),
            branches.attempted()
        );
        for failure in &branches.failures {
            println!(
                "⚠️  Impossible de créer la branche {}: {}",
                failure.branch, failure.message
            );
        }
    }
}
