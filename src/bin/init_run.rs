// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::Client;
use tracing::info;

use gpu_addon::bootstrap;
use gpu_addon::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    gpu_addon::logging::init();

    info!("Start running init");

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: operator_namespace={}",
        config.operator_namespace
    );

    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    bootstrap::run(&client, &config).await?;

    info!("Init finished");
    Ok(())
}
