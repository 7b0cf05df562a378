// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Read-modify-write of YAML documents on disk

use crate::error::{AddonError, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

pub fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).map_err(|e| AddonError::io(path, e))?;
    serde_yaml::from_str(&raw).map_err(|source| AddonError::YamlParse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_yaml<T: Serialize>(path: &Path, doc: &T) -> Result<()> {
    let raw = serde_yaml::to_string(doc).map_err(|source| AddonError::YamlSerialize {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, raw).map_err(|e| AddonError::io(path, e))
}

/// Load the document at `path`, apply `edit` and write it back in place.
/// Nothing is written when `edit` fails.
pub fn edit_yaml<T, F>(path: &Path, edit: F) -> Result<()>
where
    T: DeserializeOwned + Serialize,
    F: FnOnce(&mut T) -> Result<()>,
{
    let mut doc: T = read_yaml(path)?;
    edit(&mut doc)?;
    write_yaml(path, &doc)?;
    debug!("Wrote {}", path.display());
    Ok(())
}
