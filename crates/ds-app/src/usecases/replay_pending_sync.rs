//! Replay a project's pending remote write after connectivity returns.
//!
//! Invoked by the host deferred-retry facility through the
//! `RetryReplayHandler` seam. The replay always reads the *current* cache
//! record, never a value captured at registration time; if a foreground
//! write already won the race (`pending_sync == false`) the replay is a
//! no-op.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, info_span, warn, Instrument};

use ds_core::ids::ProjectId;
use ds_core::ports::{
    ConnectivityPort, LocalCachePort, ProjectDirectoryPort, RemoteStorePort, RetryReplayHandler,
};
use ds_core::retry::project_from_tag;

use crate::sync::DeferredRetryRegistry;

pub struct ReplayPendingSyncUseCase {
    local_cache: Arc<dyn LocalCachePort>,
    remote_store: Arc<dyn RemoteStorePort>,
    connectivity: Arc<dyn ConnectivityPort>,
    directory: Arc<dyn ProjectDirectoryPort>,
    retry_registry: Arc<DeferredRetryRegistry>,
}

impl ReplayPendingSyncUseCase {
    pub fn new(
        local_cache: Arc<dyn LocalCachePort>,
        remote_store: Arc<dyn RemoteStorePort>,
        connectivity: Arc<dyn ConnectivityPort>,
        directory: Arc<dyn ProjectDirectoryPort>,
        retry_registry: Arc<DeferredRetryRegistry>,
    ) -> Self {
        Self {
            local_cache,
            remote_store,
            connectivity,
            directory,
            retry_registry,
        }
    }

    pub async fn execute(&self, project_id: &ProjectId) {
        let span = info_span!("draft_sync.replay", project = %project_id);
        self.execute_inner(project_id).instrument(span).await
    }

    async fn execute_inner(&self, project_id: &ProjectId) {
        let record = match self.local_cache.get(project_id).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!("no cache record to replay");
                return;
            }
            Err(err) => {
                warn!(error = %err, "failed to read cache record for replay");
                return;
            }
        };

        if !record.pending_sync {
            debug!("record already synced; replay is a no-op");
            return;
        }

        let Some(remote_id) = self.directory.remote_id(project_id) else {
            debug!("project not yet remotely addressable; replay deferred to foreground");
            return;
        };

        let snapshot = record.snapshot();
        match self.remote_store.push_draft(&remote_id, &snapshot).await {
            Ok(()) => {
                if let Err(err) = self.local_cache.mark_synced(project_id).await {
                    warn!(error = %err, "failed to clear pending_sync after replayed write");
                }
                info!("replayed pending draft write");
            }
            Err(err) if err.is_connectivity() && !self.connectivity.is_online() => {
                // Still offline: queue up for the next connectivity flip,
                // same branch a foreground failure takes.
                warn!(error = %err, "replay failed while offline; re-registering");
                self.retry_registry.register(project_id).await;
            }
            Err(err) => {
                warn!(error = %err, "replayed draft write failed; leaving record pending");
            }
        }
    }
}

#[async_trait]
impl RetryReplayHandler for ReplayPendingSyncUseCase {
    async fn replay(&self, tag: &str) {
        let Some(project_id) = project_from_tag(tag) else {
            warn!(tag, "ignoring replay request with foreign tag");
            return;
        };

        // The live intent is consumed either way; a further failure inside
        // execute registers a fresh one.
        self.retry_registry.complete(&project_id).await;
        self.execute(&project_id).await;
    }
}
