// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Edits applied to a freshly downloaded bundle

use crate::bundle::yaml::edit_yaml;
use crate::config::BundleLayout;
use crate::constants::init_container;
use crate::error::{AddonError, Result};
use crate::types::rbac::{
    addon_rules, append_missing_rules, append_rules, set_first_subject_namespace,
};
use crate::types::{BundleAnnotations, ClusterServiceVersion};
use k8s_openapi::api::core::v1::Container;
use k8s_openapi::api::rbac::v1::{ClusterRoleBinding, Role, RoleBinding};
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Point the operator's RoleBinding and ClusterRoleBinding at `namespace`
#[instrument(skip(layout))]
pub fn update_role_binding_namespaces(
    layout: &BundleLayout,
    bundle_path: &Path,
    namespace: &str,
) -> Result<()> {
    info!("Setting namespace {} in role bindings", namespace);

    edit_yaml(&bundle_path.join(&layout.role_binding), |binding: &mut RoleBinding| {
        set_first_subject_namespace(binding, namespace)
    })?;
    edit_yaml(
        &bundle_path.join(&layout.cluster_role_binding),
        |binding: &mut ClusterRoleBinding| set_first_subject_namespace(binding, namespace),
    )
}

/// Grant the operator role the extra rules the addon needs.
///
/// A freshly downloaded role always gets both rules appended. With
/// `skip_present` set, rules the role already carries are left out so that
/// patching an already patched bundle does not grow it.
#[instrument(skip(layout))]
pub fn update_role(layout: &BundleLayout, bundle_path: &Path, skip_present: bool) -> Result<()> {
    info!("Updating role");

    edit_yaml(&bundle_path.join(&layout.role), |role: &mut Role| {
        let added = if skip_present {
            append_missing_rules(role, &addon_rules())
        } else {
            append_rules(role, &addon_rules())
        };
        debug!("Appended {} rules", added);
        Ok(())
    })
}

#[instrument(skip(layout))]
pub fn handle_annotations(layout: &BundleLayout, bundle_path: &Path, channel: &str) -> Result<()> {
    info!("Handling annotations");

    edit_yaml(
        &bundle_path.join(&layout.annotations),
        |doc: &mut BundleAnnotations| {
            doc.set_channel(channel);
            doc.set_package(&layout.addon_name);
            Ok(())
        },
    )
}

/// Rename the CSV for the addon package, chain it to the previous version and
/// inject the init container
#[instrument(skip(layout))]
pub fn handle_csv(
    layout: &BundleLayout,
    bundle_path: &Path,
    version: &str,
    prev_version: &str,
) -> Result<()> {
    info!("Handling csv");

    edit_yaml(
        &bundle_path.join(&layout.csv),
        |csv: &mut ClusterServiceVersion| {
            csv.set_name(&layout.csv_name(version))?;
            csv.set_replaces(&layout.csv_name(prev_version))?;
            csv.set_init_containers(&[addon_init_container()])
        },
    )
}

/// Copy the dependency file of the previous bundle version verbatim
#[instrument(skip(layout))]
pub fn copy_dependencies(layout: &BundleLayout, version: &str, prev_version: &str) -> Result<()> {
    info!("Copy dependency file from old version");

    let from = layout.bundle_path(prev_version).join(&layout.dependencies);
    let to = layout.bundle_path(version).join(&layout.dependencies);

    if !from.is_file() {
        return Err(AddonError::BundleNotFound(from));
    }
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(|e| AddonError::io(parent, e))?;
    }
    fs::copy(&from, &to).map_err(|e| AddonError::io(&to, e))?;
    Ok(())
}

/// The container that bootstraps NFD and the ClusterPolicy before the operator starts
pub fn addon_init_container() -> Container {
    Container {
        name: init_container::NAME.to_string(),
        image: Some(init_container::IMAGE.to_string()),
        command: Some(vec![init_container::COMMAND.to_string()]),
        ..Default::default()
    }
}
