//! Scratch store port - last-resort key-value tier
//!
//! A degrade-gracefully fallback for when the durable cache itself is
//! unavailable (storage quota exhaustion, restrictive runtimes). Keys are
//! namespaced strings; see `ds-app`'s resumption chain for the layout.

use async_trait::async_trait;
use thiserror::Error;

use crate::ids::ProjectId;

/// Key under which a project's wizard position is mirrored into the scratch
/// tier.
pub fn last_step_key(project_id: &ProjectId) -> String {
    format!("entity:{project_id}:lastStep")
}

#[derive(Debug, Error)]
pub enum ScratchStoreError {
    #[error("scratch storage error: {0}")]
    Storage(String),
}

#[async_trait]
pub trait ScratchStorePort: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, ScratchStoreError>;

    async fn put(&self, key: &str, value: &str) -> Result<(), ScratchStoreError>;
}
