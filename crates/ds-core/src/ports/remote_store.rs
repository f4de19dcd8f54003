//! Remote store port - the cross-device authoritative tier
//!
//! The update endpoint is an idempotent partial update carrying the full
//! snapshot, so a superseded write arriving late cannot corrupt state.

use async_trait::async_trait;
use thiserror::Error;

use crate::editor::EditorSnapshot;
use crate::ids::{ProjectId, StepId};

#[derive(Debug, Error)]
pub enum RemoteStoreError {
    /// The network could not be reached at all.
    #[error("remote store unreachable: {0}")]
    Unreachable(String),

    /// The bounded request window elapsed; treated like any other
    /// connectivity-class failure.
    #[error("remote request timed out after {0} ms")]
    Timeout(u64),

    /// The remote accepted the connection but rejected the payload.
    /// Reconnecting will not fix this, so it is never retried automatically.
    #[error("remote rejected update (status {status}): {message}")]
    Rejected { status: u16, message: String },
}

impl RemoteStoreError {
    /// Whether the failure is attributable to connectivity rather than to
    /// the payload. Only these failures are candidates for deferred retry.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Unreachable(_) | Self::Timeout(_))
    }
}

#[async_trait]
pub trait RemoteStorePort: Send + Sync {
    /// Push the current draft state for a remotely-addressable project.
    async fn push_draft(
        &self,
        project_id: &ProjectId,
        draft: &EditorSnapshot,
    ) -> Result<(), RemoteStoreError>;

    /// Read the persisted wizard position, `Ok(None)` when the project does
    /// not exist remotely or carries no step.
    async fn fetch_last_step(
        &self,
        project_id: &ProjectId,
    ) -> Result<Option<StepId>, RemoteStoreError>;
}
