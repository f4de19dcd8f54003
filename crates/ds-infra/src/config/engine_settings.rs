//! On-device engine settings file.
//!
//! Materializes `SyncConfig` overrides from a JSON file; a missing file
//! yields the v1 defaults, and partial files keep defaults for the fields
//! they omit.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use ds_core::config::SyncConfig;

pub struct FileEngineSettings {
    path: PathBuf,
}

impl FileEngineSettings {
    pub fn new(config_dir: impl AsRef<Path>) -> Self {
        Self {
            path: config_dir.as_ref().join("draft-sync.json"),
        }
    }

    pub async fn load(&self) -> Result<SyncConfig> {
        if !self.path.exists() {
            return Ok(SyncConfig::defaults());
        }

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read {}", self.path.display()))?;

        let config = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;

        Ok(config)
    }
}
