// ============================================================
// Layer 6 — Artifact Store
// ============================================================
// Writes a serialisable value as pretty JSON or as YAML, picked
// from the file extension. The bytes go to a temp file in the
// target directory first and are then renamed over the
// destination, so readers see either the old file or the
// complete new one.

use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
};
use tempfile::NamedTempFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Json,
    Yaml,
}

impl ArtifactFormat {
    /// `.yml` / `.yaml` → YAML, anything else → JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml") => {
                ArtifactFormat::Yaml
            }
            _ => ArtifactFormat::Json,
        }
    }
}

pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    write_atomic(path, |writer| {
        serde_json::to_writer_pretty(&mut *writer, value)?;
        Ok(())
    })
}

pub fn write_yaml_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    write_atomic(path, |writer| {
        serde_yaml::to_writer(&mut *writer, value)?;
        Ok(())
    })
}

fn write_atomic<F>(path: &Path, encode: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&fs::File>) -> Result<()>,
{
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)
        .with_context(|| format!("Cannot create directory '{}'", parent_dir.display()))?;

    let temp_file = NamedTempFile::new_in(parent_dir)
        .with_context(|| format!("Cannot create temp file in '{}'", parent_dir.display()))?;

    {
        let mut writer = BufWriter::new(temp_file.as_file());
        encode(&mut writer).with_context(|| format!("Cannot encode '{}'", path.display()))?;
        writer.flush()?;
    }

    temp_file
        .persist(path)
        .with_context(|| format!("Cannot write '{}'", path.display()))?;

    tracing::debug!("Wrote artifact '{}'", path.display());
    Ok(())
}
