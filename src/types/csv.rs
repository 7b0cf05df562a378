// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! ClusterServiceVersion document.
//!
//! Only the fields a version bump rewrites are addressed, each through a
//! checked path. Everything else passes through untouched.

use crate::error::{AddonError, Result};
use k8s_openapi::api::core::v1::Container;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::fmt::Write;

enum Segment {
    Key(&'static str),
    Index(usize),
}

use Segment::{Index, Key};

const METADATA: &[Segment] = &[Key("metadata")];
const SPEC: &[Segment] = &[Key("spec")];
const POD_SPEC: &[Segment] = &[
    Key("spec"),
    Key("install"),
    Key("spec"),
    Key("deployments"),
    Index(0),
    Key("spec"),
    Key("template"),
    Key("spec"),
];

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(transparent)]
pub struct ClusterServiceVersion(Value);

impl ClusterServiceVersion {
    pub fn name(&self) -> Option<&str> {
        self.0.get("metadata")?.get("name")?.as_str()
    }

    pub fn replaces(&self) -> Option<&str> {
        self.0.get("spec")?.get("replaces")?.as_str()
    }

    /// Init containers of the first install deployment
    pub fn init_containers(&self) -> Option<&Value> {
        let mut node = &self.0;
        for segment in POD_SPEC {
            node = match segment {
                Key(key) => node.get(key)?,
                Index(i) => node.get(i)?,
            };
        }
        node.get("initContainers")
    }

    pub fn set_name(&mut self, name: &str) -> Result<()> {
        mapping_at(&mut self.0, METADATA)?.insert("name".into(), name.into());
        Ok(())
    }

    pub fn set_replaces(&mut self, replaces: &str) -> Result<()> {
        mapping_at(&mut self.0, SPEC)?.insert("replaces".into(), replaces.into());
        Ok(())
    }

    /// Replace the first install deployment's init containers
    pub fn set_init_containers(&mut self, containers: &[Container]) -> Result<()> {
        let value = serde_yaml::to_value(containers)
            .map_err(|e| AddonError::Encode("initContainers", e))?;
        mapping_at(&mut self.0, POD_SPEC)?.insert("initContainers".into(), value);
        Ok(())
    }
}

/// Walk `path` from `root`, requiring a mapping at the end of it
fn mapping_at<'a>(root: &'a mut Value, path: &[Segment]) -> Result<&'a mut Mapping> {
    let mut node = root;
    for (depth, segment) in path.iter().enumerate() {
        let next = match segment {
            Key(key) => node.get_mut(key),
            Index(i) => node.get_mut(i),
        };
        node = next.ok_or_else(|| AddonError::MissingField(render(&path[..=depth])))?;
    }
    node.as_mapping_mut()
        .ok_or_else(|| AddonError::MissingField(format!("{} (not a mapping)", render(path))))
}

fn render(path: &[Segment]) -> String {
    let mut out = String::new();
    for segment in path {
        match segment {
            Key(key) if out.is_empty() => out.push_str(key),
            Key(key) => {
                let _ = write!(out, ".{}", key);
            }
            Index(i) => {
                let _ = write!(out, "[{}]", i);
            }
        }
    }
    out
}
