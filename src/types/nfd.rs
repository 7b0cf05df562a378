// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::nfd;
use kube::CustomResource;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(
    group = "nfd.openshift.io",
    version = "v1",
    kind = "NodeFeatureDiscovery",
    plural = "nodefeaturediscoveries"
)]
#[kube(namespaced)]
#[serde(rename_all = "camelCase")]
pub struct NodeFeatureDiscoverySpec {
    pub operand: OperandSpec,
    pub instance: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_config: Option<ConfigMapData>,
    pub custom_config: ConfigMapData,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperandSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_pull_policy: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMapData {
    pub config_data: String,
}

impl NodeFeatureDiscovery {
    /// The NFD instance labelling GPU nodes, created in `namespace`
    pub fn gpu_instance(namespace: &str) -> Self {
        let mut instance = NodeFeatureDiscovery::new(
            nfd::NAME,
            NodeFeatureDiscoverySpec {
                operand: OperandSpec {
                    namespace: Some(nfd::OPERAND_NAMESPACE.to_string()),
                    image: Some(nfd::OPERAND_IMAGE.to_string()),
                    image_pull_policy: Some(nfd::IMAGE_PULL_POLICY.to_string()),
                },
                instance: String::new(),
                worker_config: Some(ConfigMapData {
                    config_data: nfd::WORKER_CONFIG.to_string(),
                }),
                custom_config: ConfigMapData::default(),
            },
        );
        instance.metadata.namespace = Some(namespace.to_string());
        instance
    }
}
