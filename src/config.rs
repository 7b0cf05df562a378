// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{paths, ADDON_NAME, ADDON_PATH, DEFAULT_NAMESPACE};
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Init container configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace the NodeFeatureDiscovery instance is created in
    pub operator_namespace: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let operator_namespace = match env::var("OPERATOR_NAMESPACE") {
            Ok(ns) => ns,
            Err(env::VarError::NotPresent) => DEFAULT_NAMESPACE.to_string(),
            Err(e) => return Err(e).context("OPERATOR_NAMESPACE is not valid unicode"),
        };

        Ok(Config { operator_namespace })
    }
}

/// Where the addon and its bundle documents live inside a managed-tenants checkout.
#[derive(Debug, Clone)]
pub struct BundleLayout {
    /// Addon directory holding one sub-directory per bundle version
    pub addon_path: PathBuf,
    /// Package name used for CSV names and the bundle package annotation
    pub addon_name: String,
    pub annotations: PathBuf,
    pub dependencies: PathBuf,
    pub role: PathBuf,
    pub role_binding: PathBuf,
    pub cluster_role_binding: PathBuf,
    pub csv: PathBuf,
}

impl BundleLayout {
    /// Layout of the GPU operator addon below `managed_tenants`
    pub fn new(managed_tenants: impl AsRef<Path>) -> Self {
        let manifests = Path::new(paths::MANIFESTS);
        BundleLayout {
            addon_path: managed_tenants.as_ref().join(ADDON_PATH),
            addon_name: ADDON_NAME.to_string(),
            annotations: PathBuf::from(paths::ANNOTATIONS),
            dependencies: PathBuf::from(paths::DEPENDENCIES),
            role: manifests.join(paths::ROLE),
            role_binding: manifests.join(paths::ROLE_BINDING),
            cluster_role_binding: manifests.join(paths::CLUSTER_ROLE_BINDING),
            csv: manifests.join(paths::CSV),
        }
    }

    pub fn bundle_path(&self, version: &str) -> PathBuf {
        self.addon_path.join(version)
    }

    /// CSV name of a given bundle version, e.g. `gpu-operator-certified-addon.v1.9.1`
    pub fn csv_name(&self, version: &str) -> String {
        format!("{}.v{}", self.addon_name, version)
    }
}
