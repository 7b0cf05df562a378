// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::bundle::BundleRequest;
use crate::constants::{download::DEFAULT_SCRIPT, DEFAULT_CHANNEL, DEFAULT_NAMESPACE};
use clap::Parser;
use std::path::PathBuf;

/// Command line options of `gpu-addon-bump`
#[derive(Parser, Debug)]
#[command(name = "gpu-addon-bump")]
#[command(about = "Adds a new bundle version to the gpu addon", long_about = None)]
pub struct CliArgs {
    /// Path to the managed-tenants repository on disk.
    #[arg(short = 'm', long, value_name = "DIR_PATH")]
    pub manage_tenants_bundle_path: PathBuf,

    /// OLM channel the new bundle is published on.
    #[arg(short, long, default_value = DEFAULT_CHANNEL)]
    pub channel: String,

    /// Target namespace of the operator service account.
    #[arg(short, long, default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// New operator bundle version.
    #[arg(short, long)]
    pub version: String,

    /// Previous operator bundle version, the one the new CSV replaces.
    #[arg(short, long)]
    pub prev_version: String,

    /// Helper that fetches `bundle/<version>` into `$WORKING_DIR`. A relative
    /// path, including the default, is resolved against the current working
    /// directory, so run from the repository root or pass an absolute path.
    #[arg(long, env = "BUNDLE_DOWNLOAD_SCRIPT", default_value = DEFAULT_SCRIPT, value_name = "FILE_PATH")]
    pub download_script: PathBuf,

    /// Patch a bundle directory that is already present instead of downloading it.
    #[arg(long, default_value_t = false)]
    pub skip_download: bool,
}

impl CliArgs {
    pub fn request(&self) -> BundleRequest {
        BundleRequest {
            version: self.version.clone(),
            prev_version: self.prev_version.clone(),
            channel: self.channel.clone(),
            namespace: self.namespace.clone(),
        }
    }
}
