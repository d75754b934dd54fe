// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> settings --> Logging --> Command Dispatch
//!   Mirror | Validate | Install
//! ```

use std::process::ExitCode;

use pushguardian::cli::global::GlobalOptions;
use pushguardian::cli::{self, Command};
use pushguardian::cmd::install::run_install_command;
use pushguardian::cmd::mirror::run_mirror_command;
use pushguardian::cmd::validate::run_validate_command;
use pushguardian::config::{Settings, load_settings};
use pushguardian::logging::init_logging;
use pushguardian::logging::{LogConfig, LogLevel};
use pushguardian::menu::LinePrompt;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ Configuration invalide: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let quiet = matches!(cli.command, Some(Command::Validate(_)));
    let log_config = build_log_config(&cli.global, &settings, quiet);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &settings).await
}

/// Hooks stay quiet unless asked otherwise: `validate` logs warnings only.
fn build_log_config(global: &GlobalOptions, settings: &Settings, quiet: bool) -> LogConfig {
    let default_level = if quiet { LogLevel::WARN } else { LogLevel::INFO };
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .or(settings.log_level)
        .unwrap_or(default_level);

    let log_file = global
        .log_file
        .as_ref()
        .or(settings.log_file.as_ref())
        .map(|p| p.display().to_string());

    LogConfig::builder()
        .with_console_level(console_level)
        .maybe_with_log_file(log_file)
        .build()
}

async fn dispatch_command(cli: &cli::Cli, settings: &Settings) -> ExitCode {
    let root = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("❌ Répertoire courant inaccessible: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match &cli.command {
        Some(Command::Mirror(args)) => run_mirror_command(args, settings, &root).await.map(|()| 0),
        Some(Command::Validate(args)) => run_validate_command(args, settings, &root).await,
        Some(Command::Install(args)) => {
            run_install_command(args, settings, &root, &LinePrompt::stdio()).map(|()| 0)
        }
        None => Err(anyhow::anyhow!(
            "Aucune commande spécifiée. Utilisez --help pour l'aide."
        )),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("❌ {e:#}");
            ExitCode::FAILURE
        }
    }
}
