// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Package name of the addon, also the prefix of every CSV name
pub const ADDON_NAME: &str = "gpu-operator-certified-addon";

/// Addon directory inside a managed-tenants checkout
pub const ADDON_PATH: &str = "addons/gpu-operator/main";

/// Namespace the addon is installed into
pub const DEFAULT_NAMESPACE: &str = "redhat-gpu-operator";

/// OLM channel used when none is given
pub const DEFAULT_CHANNEL: &str = "alpha";

/// Bundle-relative locations of the documents touched by a version bump
pub mod paths {
    pub const ANNOTATIONS: &str = "metadata/annotations.yaml";
    pub const DEPENDENCIES: &str = "metadata/dependencies.yaml";
    pub const MANIFESTS: &str = "manifests";
    pub const ROLE: &str = "gpu-operator_rbac.authorization.k8s.io_v1_role.yaml";
    pub const ROLE_BINDING: &str = "gpu-operator_rbac.authorization.k8s.io_v1_rolebinding.yaml";
    pub const CLUSTER_ROLE_BINDING: &str =
        "gpu-operator_rbac.authorization.k8s.io_v1_clusterrolebinding.yaml";
    pub const CSV: &str = "gpu-operator.clusterserviceversion.yaml";
}

/// Operator bundle annotation keys
pub mod annotations {
    pub const CHANNELS: &str = "operators.operatorframework.io.bundle.channels.v1";
    pub const DEFAULT_CHANNEL: &str = "operators.operatorframework.io.bundle.channel.default.v1";
    pub const PACKAGE: &str = "operators.operatorframework.io.bundle.package.v1";
}

/// Download helper contract
pub mod download {
    /// Environment variable telling the helper where to stage the bundle
    pub const WORKING_DIR_ENV: &str = "WORKING_DIR";
    /// Staging directory the helper creates under the working dir
    pub const STAGING_DIR: &str = "bundle";
    pub const DEFAULT_SCRIPT: &str = "hack/gitlab_download.sh";
}

/// Init container injected into the operator deployment
pub mod init_container {
    pub const NAME: &str = "gpu-init-container";
    pub const IMAGE: &str = "quay.io/itsoiref/gpu_init_container:latest";
    pub const COMMAND: &str = "/usr/bin/init_run";
}

/// Node Feature Discovery instance created by the init container
pub mod nfd {
    pub const NAME: &str = "nfd-instance";
    pub const OPERAND_NAMESPACE: &str = "openshift-nfd";
    pub const OPERAND_IMAGE: &str = "registry.redhat.io/openshift4/ose-node-feature-discovery@sha256:a3ed882e2d6e227d1d746fcefa8e129fec8bd1843d8dbece9888986474af7da6";
    pub const IMAGE_PULL_POLICY: &str = "Always";
    /// nfd-worker configuration, only PCI vendor labels for NICs, display and accelerator classes
    pub const WORKER_CONFIG: &str = "core:
  sleepInterval: 60s
sources:
  pci:
    deviceClassWhitelist:
      - \"0200\"
      - \"03\"
      - \"12\"
    deviceLabelFields:
      - \"vendor\"
";
}

/// GPU ClusterPolicy created by the init container
pub mod cluster_policy {
    pub const NAME: &str = "gpu-cluster-policy";
    pub const DEFAULT_RUNTIME: &str = "crio";
    pub const PRIORITY_CLASS: &str = "system-node-critical";
    pub const GPU_TAINT_KEY: &str = "nvidia.com/gpu";
    pub const MIG_STRATEGY: &str = "single";
    pub const DCGM_HOST_PORT: i32 = 5555;
}
