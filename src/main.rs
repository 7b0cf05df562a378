// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use clap::Parser;
use tracing::info;

use gpu_addon::bundle::{BundleUpgrader, PreDownloaded, ScriptDownloader};
use gpu_addon::cli::CliArgs;
use gpu_addon::config::BundleLayout;

fn main() -> Result<()> {
    gpu_addon::logging::init();

    let args = CliArgs::parse();
    let layout = BundleLayout::new(&args.manage_tenants_bundle_path);
    let request = args.request();

    info!(
        "Adding bundle {} (replaces {}) to {}",
        request.version,
        request.prev_version,
        layout.addon_path.display()
    );

    if args.skip_download {
        BundleUpgrader::new(layout, PreDownloaded).run(&request)?;
    } else {
        BundleUpgrader::new(layout, ScriptDownloader::new(&args.download_script)).run(&request)?;
    }

    Ok(())
}
