//! Local cache port - the durable on-device draft tier
//!
//! One record per project, surviving reloads and offline periods. Writes are
//! best-effort from the orchestrator's point of view: a failed mirror is
//! recoverable from the remote store on next load.

use async_trait::async_trait;
use thiserror::Error;

use crate::editor::CacheRecord;
use crate::ids::ProjectId;

#[derive(Debug, Error)]
pub enum LocalCacheError {
    #[error("cache storage error: {0}")]
    Storage(String),

    #[error("cache record corrupt: {0}")]
    Corrupt(String),
}

#[async_trait]
pub trait LocalCachePort: Send + Sync {
    /// Fetch the record for a project, `None` if nothing was ever mirrored.
    async fn get(&self, project_id: &ProjectId) -> Result<Option<CacheRecord>, LocalCacheError>;

    /// Insert or replace the record for `record.project_id`.
    async fn put(&self, record: &CacheRecord) -> Result<(), LocalCacheError>;

    /// Clear `pending_sync` after the remote store confirmed the write.
    async fn mark_synced(&self, project_id: &ProjectId) -> Result<(), LocalCacheError>;

    /// Records whose most recent write has not been confirmed remotely.
    async fn list_pending(&self) -> Result<Vec<CacheRecord>, LocalCacheError>;

    /// Drop the record entirely (project deleted).
    async fn remove(&self, project_id: &ProjectId) -> Result<(), LocalCacheError>;
}
