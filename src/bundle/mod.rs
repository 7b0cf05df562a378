// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Adding a new bundle version to the addon.

pub mod download;
pub mod manifests;
pub mod yaml;

pub use download::{BundleDownloader, PreDownloaded, ScriptDownloader};

use crate::config::BundleLayout;
use crate::error::Result;
use std::path::PathBuf;
use tracing::{info, instrument};

/// Parameters of one version bump
#[derive(Debug, Clone)]
pub struct BundleRequest {
    pub version: String,
    pub prev_version: String,
    pub channel: String,
    pub namespace: String,
}

/// Downloads a bundle version and patches it into an installable addon bundle
pub struct BundleUpgrader<D> {
    layout: BundleLayout,
    downloader: D,
}

impl<D: BundleDownloader> BundleUpgrader<D> {
    pub fn new(layout: BundleLayout, downloader: D) -> Self {
        Self { layout, downloader }
    }

    /// Run every step in order, stopping at the first failure.
    /// Returns the directory of the new bundle.
    #[instrument(skip(self), fields(version = %request.version, prev_version = %request.prev_version))]
    pub fn run(&self, request: &BundleRequest) -> Result<PathBuf> {
        let layout = &self.layout;

        let bundle_path = self
            .downloader
            .download(&request.version, &layout.addon_path)?;

        manifests::update_role_binding_namespaces(layout, &bundle_path, &request.namespace)?;
        manifests::update_role(layout, &bundle_path, self.downloader.reuses_existing())?;
        manifests::handle_annotations(layout, &bundle_path, &request.channel)?;
        manifests::handle_csv(layout, &bundle_path, &request.version, &request.prev_version)?;
        manifests::copy_dependencies(layout, &request.version, &request.prev_version)?;

        info!("Bundle {} ready at {}", request.version, bundle_path.display());
        Ok(bundle_path)
    }
}
