//! Startup drain of drafts that never reached the remote store.
//!
//! The host retry facility only covers intents registered in the current
//! runtime; after a reload, records left `pending_sync` would otherwise
//! strand until the next foreground edit of that project.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, info_span, warn, Instrument};

use ds_core::ports::LocalCachePort;

use crate::usecases::replay_pending_sync::ReplayPendingSyncUseCase;

pub struct ResumePendingSyncSweep {
    local_cache: Arc<dyn LocalCachePort>,
    replay: Arc<ReplayPendingSyncUseCase>,
}

impl ResumePendingSyncSweep {
    pub fn new(local_cache: Arc<dyn LocalCachePort>, replay: Arc<ReplayPendingSyncUseCase>) -> Self {
        Self { local_cache, replay }
    }

    /// Replay every pending record. Returns how many were attempted.
    pub async fn execute(&self) -> usize {
        let span = info_span!("draft_sync.pending_sweep");
        self.execute_inner().instrument(span).await
    }

    async fn execute_inner(&self) -> usize {
        let pending = match self.local_cache.list_pending().await {
            Ok(pending) => pending,
            Err(err) => {
                warn!(error = %err, "failed to list pending records; skipping sweep");
                return 0;
            }
        };

        if pending.is_empty() {
            return 0;
        }

        let count = pending.len();
        join_all(
            pending
                .iter()
                .map(|record| self.replay.execute(&record.project_id)),
        )
        .await;

        info!(count, "pending-sync sweep complete");
        count
    }
}
