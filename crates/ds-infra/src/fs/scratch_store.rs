//! JSON-file scratch tier.
//!
//! A single flat key-value file, written atomically via tmp-then-rename. A
//! corrupt file degrades to an empty map on read: the scratch tier is a
//! last-resort fallback and must never take the engine down with it.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::warn;

use ds_core::ports::{ScratchStoreError, ScratchStorePort};

pub struct JsonScratchStore {
    path: PathBuf,
}

impl JsonScratchStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            path: data_dir.join("scratch.json"),
        }
    }

    async fn load(&self) -> Result<HashMap<String, String>, ScratchStoreError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|err| ScratchStoreError::Storage(err.to_string()))?;

        match serde_json::from_str(&content) {
            Ok(values) => Ok(values),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "scratch file corrupt; starting empty");
                Ok(HashMap::new())
            }
        }
    }
}

#[async_trait]
impl ScratchStorePort for JsonScratchStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ScratchStoreError> {
        Ok(self.load().await?.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), ScratchStoreError> {
        let mut values = self.load().await?;
        values.insert(key.to_string(), value.to_string());

        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|err| ScratchStoreError::Storage(err.to_string()))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(&values)
            .map_err(|err| ScratchStoreError::Storage(err.to_string()))?;

        tokio::fs::write(&tmp, json)
            .await
            .map_err(|err| ScratchStoreError::Storage(err.to_string()))?;

        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|err| ScratchStoreError::Storage(err.to_string()))?;

        Ok(())
    }
}
