// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::cluster_policy as policy;
use k8s_openapi::api::core::v1::{EnvVar, Toleration};
use kube::CustomResource;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(
    group = "nvidia.com",
    version = "v1",
    kind = "ClusterPolicy",
    plural = "clusterpolicies"
)]
#[serde(rename_all = "camelCase")]
pub struct ClusterPolicySpec {
    pub operator: OperatorSpec,
    pub daemonsets: DaemonsetsSpec,
    pub driver: DriverSpec,
    pub toolkit: ComponentSpec,
    pub device_plugin: ComponentSpec,
    pub dcgm_exporter: ComponentSpec,
    pub dcgm: DcgmSpec,
    pub node_status_exporter: ComponentSpec,
    pub gfd: ComponentSpec,
    pub mig: MigSpec,
    pub mig_manager: ComponentSpec,
    pub validator: ComponentSpec,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperatorSpec {
    pub default_runtime: String,
    pub init_container: ImageSpec,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DaemonsetsSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tolerations: Vec<Toleration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_class_name: Option<String>,
}

/// Container image coordinates, `<repository>/<image>@<version>` when the version is a digest
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageSpec {
    pub repository: String,
    pub image: String,
    pub version: String,
}

/// Settings shared by every operand the policy deploys
#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(flatten)]
    pub image: ImageSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_pull_secrets: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<EnvVar>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DriverSpec {
    #[serde(flatten)]
    pub component: ComponentSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rdma: Option<Toggle>,
    pub manager: ComponentSpec,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DcgmSpec {
    #[serde(flatten)]
    pub component: ComponentSpec,
    pub host_port: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
pub struct Toggle {
    pub enabled: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
pub struct MigSpec {
    pub strategy: String,
}

fn image(repository: &str, image: &str, digest: &str) -> ImageSpec {
    ImageSpec {
        repository: repository.to_string(),
        image: image.to_string(),
        version: format!("sha256:{}", digest),
    }
}

fn env(vars: &[(&str, &str)]) -> Vec<EnvVar> {
    vars.iter()
        .map(|(name, value)| EnvVar {
            name: name.to_string(),
            value: Some(value.to_string()),
            ..Default::default()
        })
        .collect()
}

fn component(enabled: Option<bool>, image: ImageSpec, vars: &[(&str, &str)]) -> ComponentSpec {
    ComponentSpec {
        enabled,
        image,
        image_pull_secrets: None,
        env: env(vars),
    }
}

/// Pull secrets are set explicitly empty for the operands that pull from private registries
fn with_empty_pull_secrets(mut spec: ComponentSpec) -> ComponentSpec {
    spec.image_pull_secrets = Some(Vec::new());
    spec
}

const VALIDATOR_DIGEST: &str = "1cce434a1722288bacab5eaa5c194ca2bdbad55679ba871a2814556853339585";

impl ClusterPolicy {
    /// The GPU operator configuration deployed with the addon
    pub fn gpu_defaults() -> Self {
        let spec = ClusterPolicySpec {
            operator: OperatorSpec {
                default_runtime: policy::DEFAULT_RUNTIME.to_string(),
                init_container: image(
                    "nvcr.io/nvidia",
                    "cuda",
                    "15674e5c45c97994bc92387bad03a0d52d7c1e983709c471c4fecc8e806dbdce",
                ),
            },
            daemonsets: DaemonsetsSpec {
                tolerations: vec![Toleration {
                    key: Some(policy::GPU_TAINT_KEY.to_string()),
                    operator: Some("Exists".to_string()),
                    effect: Some("NoSchedule".to_string()),
                    ..Default::default()
                }],
                priority_class_name: Some(policy::PRIORITY_CLASS.to_string()),
            },
            driver: DriverSpec {
                component: with_empty_pull_secrets(component(
                    Some(true),
                    image(
                        "nvcr.io/nvidia",
                        "driver",
                        "a62de5e843a41c65cf837e7db5f5b675d03fa2de05e981a859b114336cf183e3",
                    ),
                    &[],
                )),
                rdma: Some(Toggle { enabled: true }),
                manager: with_empty_pull_secrets(component(
                    None,
                    image(
                        "nvcr.io/nvidia/cloud-native",
                        "k8s-driver-manager",
                        "907ab0fc008bb90149ed059ac3a8ed3d19ae010d52c58c0ddbafce45df468d5b",
                    ),
                    &[
                        ("DRAIN_USE_FORCE", "false"),
                        ("DRAIN_POD_SELECTOR_LABEL", ""),
                        ("DRAIN_TIMEOUT_SECONDS", "0s"),
                        ("DRAIN_DELETE_EMPTYDIR_DATA", "false"),
                    ],
                )),
            },
            toolkit: with_empty_pull_secrets(component(
                Some(true),
                image(
                    "nvcr.io/nvidia/k8s",
                    "container-toolkit",
                    "8f9517b4c83b8730c40134df385088be41519b585176c66727ff6f181ae5e703",
                ),
                &[],
            )),
            device_plugin: with_empty_pull_secrets(component(
                None,
                image(
                    "nvcr.io/nvidia",
                    "k8s-device-plugin",
                    "85def0197f388e5e336b1ab0dbec350816c40108a58af946baa1315f4c96ee05",
                ),
                &[
                    ("PASS_DEVICE_SPECS", "true"),
                    ("FAIL_ON_INIT_ERROR", "true"),
                    ("DEVICE_LIST_STRATEGY", "envvar"),
                    ("DEVICE_ID_STRATEGY", "uuid"),
                    ("NVIDIA_VISIBLE_DEVICES", "all"),
                    ("NVIDIA_DRIVER_CAPABILITIES", "all"),
                ],
            )),
            dcgm_exporter: component(
                None,
                image(
                    "nvcr.io/nvidia/k8s",
                    "dcgm-exporter",
                    "e37404194fa2bc2275827411049422b93d1493991fb925957f170b4b842846ff",
                ),
                &[
                    ("DCGM_EXPORTER_LISTEN", ":9400"),
                    ("DCGM_EXPORTER_KUBERNETES", "true"),
                    (
                        "DCGM_EXPORTER_COLLECTORS",
                        "/etc/dcgm-exporter/dcp-metrics-included.csv",
                    ),
                ],
            ),
            dcgm: DcgmSpec {
                component: component(
                    Some(true),
                    image(
                        "nvcr.io/nvidia/cloud-native",
                        "dcgm",
                        "28f334d6d5ca6e5cad2cf05a255989834128c952e3c181e6861bd033476d4b2c",
                    ),
                    &[],
                ),
                host_port: policy::DCGM_HOST_PORT,
            },
            node_status_exporter: component(
                Some(true),
                image("nvcr.io/nvidia/cloud-native", "gpu-operator-validator", VALIDATOR_DIGEST),
                &[],
            ),
            gfd: component(
                None,
                image(
                    "nvcr.io/nvidia",
                    "gpu-feature-discovery",
                    "bfc39d23568458dfd50c0c5323b6d42bdcd038c420fb2a2becd513a3ed3be27f",
                ),
                &[("GFD_SLEEP_INTERVAL", "60s"), ("FAIL_ON_INIT_ERROR", "true")],
            ),
            mig: MigSpec {
                strategy: policy::MIG_STRATEGY.to_string(),
            },
            mig_manager: component(
                Some(true),
                image(
                    "nvcr.io/nvidia/cloud-native",
                    "k8s-mig-manager",
                    "77b8e58a54c222bee3cc56b2305d4cebfa60722c122858f94301e611f87d7fec",
                ),
                &[("WITH_REBOOT", "false")],
            ),
            validator: component(
                None,
                image("nvcr.io/nvidia/cloud-native", "gpu-operator-validator", VALIDATOR_DIGEST),
                &[("WITH_WORKLOAD", "true")],
            ),
        };

        ClusterPolicy::new(policy::NAME, spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::ResourceExt;

    #[test]
    fn test_gpu_defaults_is_cluster_scoped() {
        let policy = ClusterPolicy::gpu_defaults();

        assert_eq!(policy.name_any(), "gpu-cluster-policy");
        assert_eq!(policy.namespace(), None);
    }

    #[test]
    fn test_operator_runtime_and_mig() {
        let policy = ClusterPolicy::gpu_defaults();

        assert_eq!(policy.spec.operator.default_runtime, "crio");
        assert_eq!(policy.spec.mig.strategy, "single");
        assert_eq!(policy.spec.dcgm.host_port, 5555);
    }

    #[test]
    fn test_gpu_taint_is_tolerated() {
        let policy = ClusterPolicy::gpu_defaults();
        let toleration = &policy.spec.daemonsets.tolerations[0];

        assert_eq!(toleration.key.as_deref(), Some("nvidia.com/gpu"));
        assert_eq!(toleration.effect.as_deref(), Some("NoSchedule"));
        assert_eq!(
            policy.spec.daemonsets.priority_class_name.as_deref(),
            Some("system-node-critical")
        );
    }

    #[test]
    fn test_images_are_pinned_by_digest() {
        let policy = ClusterPolicy::gpu_defaults();
        let spec = &policy.spec;
        let images = [
            &spec.operator.init_container,
            &spec.driver.component.image,
            &spec.driver.manager.image,
            &spec.toolkit.image,
            &spec.device_plugin.image,
            &spec.dcgm_exporter.image,
            &spec.dcgm.component.image,
            &spec.node_status_exporter.image,
            &spec.gfd.image,
            &spec.mig_manager.image,
            &spec.validator.image,
        ];

        for image in images {
            assert!(image.version.starts_with("sha256:"), "{:?}", image);
            assert_eq!(image.version.len(), "sha256:".len() + 64, "{:?}", image);
        }
        assert_eq!(spec.validator.image, spec.node_status_exporter.image);
    }

    #[test]
    fn test_component_env() {
        let policy = ClusterPolicy::gpu_defaults();
        let env = &policy.spec.device_plugin.env;

        assert_eq!(env.len(), 6);
        assert_eq!(env[2].name, "DEVICE_LIST_STRATEGY");
        assert_eq!(env[2].value.as_deref(), Some("envvar"));
        assert!(policy.spec.toolkit.env.is_empty());
    }

    #[test]
    fn test_serialized_layout() {
        let policy = ClusterPolicy::gpu_defaults();
        let value = serde_yaml::to_value(&policy).unwrap();
        let driver = &value["spec"]["driver"];

        assert_eq!(value["apiVersion"], "nvidia.com/v1");
        assert_eq!(driver["enabled"], true);
        assert_eq!(driver["repository"], "nvcr.io/nvidia");
        assert_eq!(driver["rdma"]["enabled"], true);
        assert_eq!(driver["manager"]["image"], "k8s-driver-manager");
        assert!(driver["imagePullSecrets"].as_sequence().unwrap().is_empty());
        assert!(value["spec"]["dcgmExporter"].get("imagePullSecrets").is_none());
        assert_eq!(value["spec"]["gfd"]["env"][0]["name"], "GFD_SLEEP_INTERVAL");
    }
}
