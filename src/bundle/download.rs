// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Fetching a bundle version into the addon directory

use crate::constants::download::{STAGING_DIR, WORKING_DIR_ENV};
use crate::error::{AddonError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{info, instrument, warn};

/// Materializes `<addon_path>/<version>` and returns that directory
pub trait BundleDownloader {
    fn download(&self, version: &str, addon_path: &Path) -> Result<PathBuf>;

    /// Whether the returned bundle may already carry the edits of an earlier run
    fn reuses_existing(&self) -> bool {
        false
    }
}

/// Runs the external download helper.
///
/// The helper receives `WORKING_DIR=<addon_path>` and a single `bundle/<version>`
/// argument, and leaves the manifests in `<addon_path>/bundle/<version>`.
#[derive(Debug, Clone)]
pub struct ScriptDownloader {
    script: PathBuf,
}

impl ScriptDownloader {
    pub fn new(script: impl Into<PathBuf>) -> Self {
        Self {
            script: script.into(),
        }
    }
}

impl BundleDownloader for ScriptDownloader {
    #[instrument(skip(self), fields(script = %self.script.display()))]
    fn download(&self, version: &str, addon_path: &Path) -> Result<PathBuf> {
        info!("Downloading new bundle {} to {}", version, addon_path.display());

        let remote = format!("{}/{}", STAGING_DIR, version);
        let status = Command::new(&self.script)
            .arg(&remote)
            .env(WORKING_DIR_ENV, addon_path)
            .status()
            .map_err(|e| {
                AddonError::DownloadFailed(format!(
                    "failed to run {}: {}",
                    self.script.display(),
                    e
                ))
            })?;

        if !status.success() {
            return Err(AddonError::DownloadFailed(format!(
                "{} {} exited with {}",
                self.script.display(),
                remote,
                status
            )));
        }

        promote_staged_bundle(version, addon_path)
    }
}

/// Move `<addon_path>/bundle/<version>` to `<addon_path>/<version>` and drop the staging dir
fn promote_staged_bundle(version: &str, addon_path: &Path) -> Result<PathBuf> {
    let staging = addon_path.join(STAGING_DIR);
    let staged = staging.join(version);
    let target = addon_path.join(version);

    if !staged.is_dir() {
        return Err(AddonError::DownloadFailed(format!(
            "helper did not produce {}",
            staged.display()
        )));
    }

    if target.exists() {
        warn!("Replacing existing bundle at {}", target.display());
        fs::remove_dir_all(&target).map_err(|e| AddonError::io(&target, e))?;
    }

    fs::rename(&staged, &target).map_err(|e| AddonError::io(&staged, e))?;
    fs::remove_dir_all(&staging).map_err(|e| AddonError::io(&staging, e))?;

    Ok(target)
}

/// Uses a bundle that is already present on disk
#[derive(Debug, Clone, Copy, Default)]
pub struct PreDownloaded;

impl BundleDownloader for PreDownloaded {
    fn download(&self, version: &str, addon_path: &Path) -> Result<PathBuf> {
        let target = addon_path.join(version);
        if !target.is_dir() {
            return Err(AddonError::BundleNotFound(target));
        }
        info!("Using existing bundle {}", target.display());
        Ok(target)
    }

    fn reuses_existing(&self) -> bool {
        true
    }
}
