// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! RBAC document edits

use crate::error::{AddonError, Result};
use k8s_openapi::api::rbac::v1::{ClusterRoleBinding, PolicyRule, Role, RoleBinding, Subject};

/// A binding whose subjects can be retargeted to another namespace
pub trait SubjectBinding {
    fn subjects_mut(&mut self) -> Option<&mut Vec<Subject>>;
}

impl SubjectBinding for RoleBinding {
    fn subjects_mut(&mut self) -> Option<&mut Vec<Subject>> {
        self.subjects.as_mut()
    }
}

impl SubjectBinding for ClusterRoleBinding {
    fn subjects_mut(&mut self) -> Option<&mut Vec<Subject>> {
        self.subjects.as_mut()
    }
}

/// Point the first subject of a binding at `namespace`
pub fn set_first_subject_namespace<B: SubjectBinding>(binding: &mut B, namespace: &str) -> Result<()> {
    let subject = binding
        .subjects_mut()
        .and_then(|subjects| subjects.first_mut())
        .ok_or_else(|| AddonError::MissingField("subjects[0]".to_string()))?;

    subject.namespace = Some(namespace.to_string());
    Ok(())
}

/// Append `rules` after the role's own rules
pub fn append_rules(role: &mut Role, rules: &[PolicyRule]) -> usize {
    role.rules
        .get_or_insert_with(Vec::new)
        .extend_from_slice(rules);
    rules.len()
}

/// Append only the `rules` the role does not already carry verbatim.
/// Used when patching a bundle that an earlier run may have patched already.
/// Returns the number of rules added.
pub fn append_missing_rules(role: &mut Role, rules: &[PolicyRule]) -> usize {
    let existing = role.rules.get_or_insert_with(Vec::new);
    let mut added = 0;
    for rule in rules {
        if !existing.contains(rule) {
            existing.push(rule.clone());
            added += 1;
        }
    }
    added
}

/// Rules the operator needs on top of the upstream role: reading its own CSV
/// and managing the NodeFeatureDiscovery instance created by the init container.
pub fn addon_rules() -> Vec<PolicyRule> {
    vec![
        rule("operators.coreos.com", "clusterserviceversions", &["get", "list"]),
        rule(
            "nfd.openshift.io",
            "nodefeaturediscoveries",
            &["get", "list", "create", "patch", "update"],
        ),
    ]
}

fn rule(api_group: &str, resource: &str, verbs: &[&str]) -> PolicyRule {
    PolicyRule {
        api_groups: Some(vec![api_group.to_string()]),
        resources: Some(vec![resource.to_string()]),
        verbs: verbs.iter().map(|v| v.to_string()).collect(),
        ..Default::default()
    }
}
