// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Spawns the `gpu-addon-bump` binary with a stub download helper.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use gpu_addon::bundle::yaml::read_yaml;
use gpu_addon::config::BundleLayout;
use gpu_addon::types::ClusterServiceVersion;

const STAGING_SCRIPT: &str = r#"#!/bin/sh
set -e
mkdir -p "$WORKING_DIR/$1"
cp -R "$FIXTURE_DIR/." "$WORKING_DIR/$1/"
"#;

const FAILING_SCRIPT: &str = "#!/bin/sh\necho 'no access to registry' >&2\nexit 3\n";

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn write_script(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("download.sh");
    fs::write(&path, body).expect("write script");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod script");
    path
}

fn seed_previous(layout: &BundleLayout) {
    let metadata = layout.bundle_path("1.9.0").join("metadata");
    fs::create_dir_all(&metadata).expect("create previous bundle");
    fs::copy(
        fixture("previous/metadata/dependencies.yaml"),
        metadata.join("dependencies.yaml"),
    )
    .expect("copy dependencies");
}

fn run_bump(managed_tenants: &Path, script: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gpu-addon-bump"))
        .arg("--manage-tenants-bundle-path")
        .arg(managed_tenants)
        .args(["--version", "1.9.1", "--prev-version", "1.9.0"])
        .arg("--download-script")
        .arg(script)
        .args(extra)
        .env("FIXTURE_DIR", fixture("upstream-bundle"))
        .env("RUST_LOG", "debug")
        .output()
        .expect("run gpu-addon-bump")
}

#[test]
fn bump_downloads_and_patches_bundle() {
    let temp = tempfile::tempdir().expect("tempdir");
    let layout = BundleLayout::new(temp.path());
    seed_previous(&layout);
    let script = write_script(temp.path(), STAGING_SCRIPT);

    let output = run_bump(temp.path(), &script, &["--channel", "stable"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let bundle = layout.bundle_path("1.9.1");
    let csv: ClusterServiceVersion = read_yaml(&bundle.join(&layout.csv)).expect("csv");
    assert_eq!(csv.replaces(), Some("gpu-operator-certified-addon.v1.9.0"));
    assert!(bundle.join(&layout.dependencies).is_file());
    assert!(!layout.addon_path.join("bundle").exists());

    let annotations = fs::read_to_string(bundle.join(&layout.annotations)).expect("annotations");
    assert!(annotations.contains("operators.operatorframework.io.bundle.channels.v1: stable"));
}

#[test]
fn failing_helper_exits_non_zero() {
    let temp = tempfile::tempdir().expect("tempdir");
    let layout = BundleLayout::new(temp.path());
    seed_previous(&layout);
    let script = write_script(temp.path(), FAILING_SCRIPT);

    let output = run_bump(temp.path(), &script, &[]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Bundle download failed"));
    assert!(!layout.bundle_path("1.9.1").exists());
}

#[test]
fn skip_download_requires_existing_bundle() {
    let temp = tempfile::tempdir().expect("tempdir");
    let layout = BundleLayout::new(temp.path());
    seed_previous(&layout);
    let script = write_script(temp.path(), FAILING_SCRIPT);

    let output = run_bump(temp.path(), &script, &["--skip-download"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Bundle not found"));
}
