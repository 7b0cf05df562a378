// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster bootstrap run by the addon's init container

use crate::config::Config;
use crate::error::Result;
use crate::types::{ClusterPolicy, NodeFeatureDiscovery};
use kube::{api::PostParams, Api, Client, Resource, ResourceExt};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use tracing::{info, instrument};

/// Create the NodeFeatureDiscovery instance and the GPU ClusterPolicy
pub async fn run(client: &Client, config: &Config) -> Result<()> {
    create_node_feature_discovery(client, &config.operator_namespace).await?;
    create_cluster_policy(client).await
}

#[instrument(skip(client))]
pub async fn create_node_feature_discovery(client: &Client, namespace: &str) -> Result<()> {
    info!("Creating nfd cr");
    let api: Api<NodeFeatureDiscovery> = Api::namespaced(client.clone(), namespace);
    create_if_absent(&api, &NodeFeatureDiscovery::gpu_instance(namespace)).await
}

#[instrument(skip(client))]
pub async fn create_cluster_policy(client: &Client) -> Result<()> {
    info!("Creating cluster policy cr");
    let api: Api<ClusterPolicy> = Api::all(client.clone());
    create_if_absent(&api, &ClusterPolicy::gpu_defaults()).await
}

/// Create `object`, treating an already existing object of that name as success
async fn create_if_absent<K>(api: &Api<K>, object: &K) -> Result<()>
where
    K: Resource<DynamicType = ()> + Clone + Debug + Serialize + DeserializeOwned,
{
    let kind = K::kind(&()).to_string();
    match api.create(&PostParams::default(), object).await {
        Ok(_) => {
            info!("{} {} created successfully", kind, object.name_any());
            Ok(())
        }
        Err(kube::Error::Api(err)) if err.code == 409 => {
            info!("{} {} already exists", kind, object.name_any());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
