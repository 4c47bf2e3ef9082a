use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{NetworkGraph, Participant};

/// Serializes `value` as indented JSON into `path`.
/// The document is written to a sibling `.tmp` file first and renamed into
/// place, so readers never see a half-written file.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create destination directory {:?}", parent))?;
        }
    }

    let bytes = serde_json::to_vec_pretty(value)
        .with_context(|| format!("Failed to serialize JSON for {:?}", path))?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, &bytes).with_context(|| format!("Failed to write {:?}", tmp_path))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to move {:?} into place at {:?}", tmp_path, path))?;
    Ok(())
}

/// Writes the flat participant list.
pub fn write_participants(dest_dir: &Path, file_name: &str, participants: &[Participant]) -> Result<PathBuf> {
    let path = dest_dir.join(file_name);
    write_json_atomic(&path, participants)?;
    info!("Saved participants data to {:?}", path);
    Ok(path)
}

/// Writes the nodes + links document.
pub fn write_network(dest_dir: &Path, file_name: &str, network: &NetworkGraph) -> Result<PathBuf> {
    let path = dest_dir.join(file_name);
    write_json_atomic(&path, network)?;
    info!("Saved network data to {:?}", path);
    Ok(path)
}
