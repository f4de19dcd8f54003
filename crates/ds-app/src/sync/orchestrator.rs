//! Persistence orchestrator for in-progress project drafts.
//!
//! On every state change the orchestrator updates the in-memory session
//! copy, mirrors the draft into the on-device cache, and schedules a
//! debounced write to the remote store; a remote failure while offline is
//! handed to the deferred-retry registry. Each tier tracks its own
//! last-written snapshot independently, since tiers fall out of sync after
//! partial failures.
//!
//! No error escapes this type: tier operations are individually
//! fault-isolated so a failure in one tier never prevents the others from
//! running.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, info_span, warn, Instrument};

use ds_core::config::SyncConfig;
use ds_core::editor::{mutation, CacheRecord, EditorSnapshot};
use ds_core::ids::{ProjectId, StepId};
use ds_core::ports::{
    last_step_key, ClockPort, ConnectivityPort, LocalCachePort, ProjectDirectoryPort,
    RemoteStorePort, ScratchStorePort,
};

use crate::deps::EngineDeps;
use crate::status_signal::StatusSignal;
use crate::sync::debounce::DebounceMap;
use crate::sync::retry_registry::DeferredRetryRegistry;

pub struct DraftSyncOrchestrator {
    inner: Arc<OrchestratorInner>,
}

struct OrchestratorInner {
    local_cache: Arc<dyn LocalCachePort>,
    remote_store: Arc<dyn RemoteStorePort>,
    scratch: Arc<dyn ScratchStorePort>,
    connectivity: Arc<dyn ConnectivityPort>,
    directory: Arc<dyn ProjectDirectoryPort>,
    clock: Arc<dyn ClockPort>,
    config: SyncConfig,
    status: StatusSignal,
    retry_registry: Arc<DeferredRetryRegistry>,

    /// Session tier: authoritative for this runtime instance.
    session: Mutex<HashMap<ProjectId, EditorSnapshot>>,

    /// Last snapshot successfully mirrored into the local cache.
    last_local: Mutex<HashMap<ProjectId, EditorSnapshot>>,

    /// Last snapshot confirmed accepted by the remote store.
    last_remote: Mutex<HashMap<ProjectId, EditorSnapshot>>,

    /// Last wizard step mirrored into the scratch tier.
    last_scratch: Mutex<HashMap<ProjectId, StepId>>,

    timers: DebounceMap,
}

impl DraftSyncOrchestrator {
    pub fn new(
        deps: &EngineDeps,
        status: StatusSignal,
        retry_registry: Arc<DeferredRetryRegistry>,
    ) -> Self {
        Self {
            inner: Arc::new(OrchestratorInner {
                local_cache: deps.local_cache.clone(),
                remote_store: deps.remote_store.clone(),
                scratch: deps.scratch.clone(),
                connectivity: deps.connectivity.clone(),
                directory: deps.directory.clone(),
                clock: deps.clock.clone(),
                config: deps.config.clone(),
                status,
                retry_registry,
                session: Mutex::new(HashMap::new()),
                last_local: Mutex::new(HashMap::new()),
                last_remote: Mutex::new(HashMap::new()),
                last_scratch: Mutex::new(HashMap::new()),
                timers: DebounceMap::new(),
            }),
        }
    }

    pub fn status(&self) -> &StatusSignal {
        &self.inner.status
    }

    /// Sole write entry point: offer the current state tree for persistence.
    pub async fn on_mutation(&self, project_id: &ProjectId, snapshot: EditorSnapshot) {
        let span = info_span!("draft_sync.on_mutation", project = %project_id);
        self.on_mutation_inner(project_id, snapshot)
            .instrument(span)
            .await
    }

    /// Flush any pending debounced write immediately. Called when the editor
    /// closes; losing the last few seconds of edits on close is the primary
    /// risk this engine exists to prevent.
    pub async fn flush(&self, project_id: &ProjectId) {
        let span = info_span!("draft_sync.flush", project = %project_id);
        self.flush_inner(project_id).instrument(span).await
    }

    pub async fn flush_all(&self) {
        let project_ids: Vec<ProjectId> =
            self.inner.session.lock().await.keys().cloned().collect();
        for project_id in project_ids {
            self.flush(&project_id).await;
        }
    }

    async fn on_mutation_inner(&self, project_id: &ProjectId, snapshot: EditorSnapshot) {
        let inner = &self.inner;

        {
            let mut session = inner.session.lock().await;
            if !mutation::differs(session.get(project_id), &snapshot) {
                debug!("state unchanged; nothing to persist");
                return;
            }
            session.insert(project_id.clone(), snapshot.clone());
        }

        let remote_dirty = {
            let last_remote = inner.last_remote.lock().await;
            mutation::differs(last_remote.get(project_id), &snapshot)
        };

        let mirrored = inner.mirror_to_cache(project_id, &snapshot, remote_dirty).await;
        inner.mirror_step_to_scratch(project_id, &snapshot).await;

        if !remote_dirty {
            debug!("matches last confirmed remote write; no remote push needed");
            if mirrored {
                inner.status.set_saving();
                inner.status.set_saved();
            }
            return;
        }

        let Some(remote_id) = inner.directory.remote_id(project_id) else {
            // Creation still in flight: the draft stays local until the
            // durable id exists, and the cache mirror is the confirming tier.
            debug!("project not yet remotely addressable; draft kept on device");
            if mirrored {
                inner.status.set_saving();
                inner.status.set_saved();
            }
            return;
        };

        inner.status.set_saving();
        let payload_units = mutation::payload_units(&snapshot);
        let delay = inner.config.debounce_for(payload_units);
        debug!(
            payload_units,
            delay_ms = delay.as_millis() as u64,
            "scheduling debounced remote write"
        );

        let task_inner = Arc::clone(inner);
        let task_project = project_id.clone();
        inner
            .timers
            .schedule(project_id.clone(), delay, async move {
                task_inner.push_current(task_project, remote_id).await;
            })
            .await;
    }

    async fn flush_inner(&self, project_id: &ProjectId) {
        let inner = &self.inner;
        let had_pending = inner.timers.cancel(project_id).await;

        let Some(snapshot) = inner.session.lock().await.get(project_id).cloned() else {
            return;
        };

        let remote_dirty = {
            let last_remote = inner.last_remote.lock().await;
            mutation::differs(last_remote.get(project_id), &snapshot)
        };
        if !remote_dirty {
            debug!("nothing to flush");
            return;
        }

        let Some(remote_id) = inner.directory.remote_id(project_id) else {
            debug!("project not yet remotely addressable; draft stays on device");
            return;
        };

        if had_pending {
            debug!("flushing pending debounced write before close");
        }
        inner.status.set_saving();
        Arc::clone(inner)
            .push_current(project_id.clone(), remote_id)
            .await;
    }
}

impl OrchestratorInner {
    /// Best-effort mirror into the local cache. Losing the mirror is
    /// recoverable from the remote store on next load, so failure is logged
    /// and swallowed. Returns whether the cache holds the current snapshot.
    async fn mirror_to_cache(
        &self,
        project_id: &ProjectId,
        snapshot: &EditorSnapshot,
        pending_sync: bool,
    ) -> bool {
        {
            let last_local = self.last_local.lock().await;
            if !mutation::differs(last_local.get(project_id), snapshot) {
                return true;
            }
        }

        let record = CacheRecord::from_snapshot(
            project_id.clone(),
            snapshot,
            self.clock.now_ms(),
            pending_sync,
        );
        match self.local_cache.put(&record).await {
            Ok(()) => {
                self.last_local
                    .lock()
                    .await
                    .insert(project_id.clone(), snapshot.clone());
                true
            }
            Err(err) => {
                warn!(error = %err, "local cache mirror failed; continuing without it");
                false
            }
        }
    }

    /// Best-effort mirror of the wizard position into the scratch tier, the
    /// last-resort resumption fallback when the cache itself is unavailable.
    async fn mirror_step_to_scratch(&self, project_id: &ProjectId, snapshot: &EditorSnapshot) {
        let Some(step) = snapshot.last_edited_step.clone() else {
            return;
        };
        {
            let last_scratch = self.last_scratch.lock().await;
            if last_scratch.get(project_id) == Some(&step) {
                return;
            }
        }

        match self.scratch.put(&last_step_key(project_id), step.as_str()).await {
            Ok(()) => {
                self.last_scratch
                    .lock()
                    .await
                    .insert(project_id.clone(), step);
            }
            Err(err) => {
                debug!(error = %err, "scratch step mirror failed");
            }
        }
    }

    /// Push the current session snapshot (not a value captured at schedule
    /// time) and fan the outcome out to status, cache, and retry registry.
    async fn push_current(self: Arc<Self>, project_id: ProjectId, remote_id: ProjectId) {
        let Some(snapshot) = self.session.lock().await.get(&project_id).cloned() else {
            return;
        };

        match self.remote_store.push_draft(&remote_id, &snapshot).await {
            Ok(()) => {
                self.last_remote
                    .lock()
                    .await
                    .insert(project_id.clone(), snapshot);
                if let Err(err) = self.local_cache.mark_synced(&project_id).await {
                    warn!(
                        project = %project_id,
                        error = %err,
                        "failed to clear pending_sync after confirmed remote write"
                    );
                }
                self.status.set_saved();
                info!(project = %project_id, "remote draft write confirmed");
            }
            Err(err) => {
                self.status.set_error();
                if err.is_connectivity() && !self.connectivity.is_online() {
                    info!(
                        project = %project_id,
                        error = %err,
                        "remote write failed while offline; deferring retry"
                    );
                    self.retry_registry.register(&project_id).await;
                } else {
                    warn!(project = %project_id, error = %err, "remote draft write failed");
                }
            }
        }
    }
}
