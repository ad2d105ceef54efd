//! Optional manifest describing one export run.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// One generated file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOutputEntry {
    pub format: String,
    pub path: PathBuf,
    pub sha256: String,
    pub size_bytes: u64,
    /// Page count for paginated formats.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<usize>,
}

/// Record of a completed export session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportManifest {
    pub export_id: Uuid,
    pub subject: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub outputs: Vec<ExportOutputEntry>,
}

impl ExportManifest {
    pub fn new(subject: &str) -> Self {
        Self {
            export_id: Uuid::new_v4(),
            subject: subject.to_string(),
            started_at: Utc::now(),
            completed_at: Utc::now(),
            outputs: Vec::new(),
        }
    }

    pub fn add_output(&mut self, entry: ExportOutputEntry) {
        self.outputs.push(entry);
    }

    /// Writes the manifest next to the exported files.
    pub fn persist(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
        let path = dir.join(format!("{}_manifest.json", self.export_id));
        let data = serde_json::to_string_pretty(self)?;
        fs::write(&path, data).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

pub fn read_manifest(path: &Path) -> Result<ExportManifest> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("Missing manifest {}", path.display()))?;
    let manifest = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid manifest {}", path.display()))?;
    Ok(manifest)
}

/// Lowercase hex SHA-256 of a file's contents.
pub fn hash_path(path: &Path) -> Result<String> {
    let mut file = File::open(path)
        .with_context(|| format!("Unable to open {} for hashing", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buf = [0_u8; 8192];
    loop {
        let read = file.read(&mut buf)?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}
