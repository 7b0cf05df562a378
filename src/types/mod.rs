// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Document and custom resource types.

pub mod annotations;
pub mod cluster_policy;
pub mod csv;
pub mod nfd;
pub mod rbac;

pub use annotations::BundleAnnotations;
pub use cluster_policy::ClusterPolicy;
pub use csv::ClusterServiceVersion;
pub use nfd::NodeFeatureDiscovery;
