// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! GitHub Actions workflow that runs `pushguardian mirror` on a schedule.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::error::GuardResult;

/// Workflow location relative to the project root.
pub const WORKFLOW_PATH: &str = ".github/workflows/mirror.yml";

const WORKFLOW_TEMPLATE: &str = r#"name: Mirror Repository

on:
  push:
    branches: [main]
  schedule:
    - cron: '0 0 * * *'
  workflow_dispatch:

jobs:
  mirror:
    runs-on: ubuntu-latest
    steps:
      - name: Checkout
        uses: actions/checkout@v4
        with:
          fetch-depth: 0

      - name: Install PushGuardian
        run: cargo install pushguardian

      - name: Mirror repository
        env:
          SOURCE_PLATFORM: ${{ vars.SOURCE_PLATFORM }}
          TARGET_PLATFORM: ${{ vars.TARGET_PLATFORM }}
          SOURCE_REPO: ${{ vars.REPO_NAME }}
          TARGET_REPO: ${{ vars.REPO_NAME }}
          SOURCE_OWNER: ${{ vars.SOURCE_OWNER }}
          TARGET_OWNER: ${{ vars.TARGET_OWNER }}
          GITHUB_TOKEN: ${{ secrets.GITHUB_TOKEN }}
          GITLAB_TOKEN: ${{ secrets.GITLAB_TOKEN }}
          BITBUCKET_USERNAME: ${{ secrets.BITBUCKET_USERNAME }}
          BITBUCKET_PASSWORD: ${{ secrets.BITBUCKET_PASSWORD }}
          AZURE_DEVOPS_URL: ${{ secrets.AZURE_DEVOPS_URL }}
          AZURE_DEVOPS_TOKEN: ${{ secrets.AZURE_DEVOPS_TOKEN }}
        run: pushguardian mirror --sync-branches
"#;

/// Writes the workflow under `root`, creating `.github/workflows` if needed.
///
/// # Errors
///
/// Returns an I/O error if the directory or the file cannot be written.
pub fn generate_workflow(root: &Path) -> GuardResult<PathBuf> {
    write_workflow(root).inspect_err(|e| {
        error!("Erreur lors de la génération du workflow: {e}");
    })
}

fn write_workflow(root: &Path) -> GuardResult<PathBuf> {
    let path = root.join(WORKFLOW_PATH);
    if let Some(dir) = path.parent()
        && !dir.exists()
    {
        fs::create_dir_all(dir)?;
        info!("Dossier .github/workflows créé");
    }
    fs::write(&path, WORKFLOW_TEMPLATE)?;
    info!(path = %path.display(), "Workflow GitHub Actions généré");
    Ok(path)
}
