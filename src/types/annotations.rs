// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::annotations::{CHANNELS, DEFAULT_CHANNEL, PACKAGE};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;

/// The bundle's `metadata/annotations.yaml` document.
///
/// Annotation values are kept as parsed YAML, so non-string values such as
/// `com.redhat.delivery.operator.bundle: true` are written back unchanged.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct BundleAnnotations {
    pub annotations: BTreeMap<String, Value>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl BundleAnnotations {
    /// Publish the bundle on `channel` and make it the default channel
    pub fn set_channel(&mut self, channel: &str) {
        self.annotations.insert(CHANNELS.to_string(), channel.into());
        self.annotations
            .insert(DEFAULT_CHANNEL.to_string(), channel.into());
    }

    pub fn set_package(&mut self, package: &str) {
        self.annotations.insert(PACKAGE.to_string(), package.into());
    }

    pub fn channel(&self) -> Option<&str> {
        self.annotations.get(CHANNELS).and_then(Value::as_str)
    }

    pub fn default_channel(&self) -> Option<&str> {
        self.annotations.get(DEFAULT_CHANNEL).and_then(Value::as_str)
    }

    pub fn package(&self) -> Option<&str> {
        self.annotations.get(PACKAGE).and_then(Value::as_str)
    }
}
