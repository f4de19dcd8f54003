//! Production wiring of the draft engine.
//!
//! Construction order matters in one place: the reconnect retry runtime and
//! the replay use case depend on each other through the retry registry, so
//! the replay handler is bound onto the runtime after both exist.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use ds_app::{
    DeferredRetryRegistry, DraftSyncOrchestrator, EngineDeps, ReplayPendingSyncUseCase,
    ResumeEditingUseCase, ResumePendingSyncSweep, StatusSignal,
};
use ds_core::ids::{ProjectId, StepId};
use ds_core::ports::{ClockPort, ConnectivityPort, RemoteStorePort};
use ds_infra::{
    default_data_dir, init_db_pool, ConnectivityHandle, DieselCacheRecordRepository,
    FileEngineSettings, HttpRemoteStore, JsonScratchStore, ReconnectRetryRuntime,
    SharedProjectDirectory, SystemClock, WatchConnectivity,
};

pub struct RuntimeConfig {
    /// On-device directory for the cache database, scratch file, and
    /// settings. Falls back to the platform data directory.
    pub data_dir: Option<PathBuf>,

    /// Base URL of the project REST API.
    pub remote_base_url: String,

    /// Initial connectivity assumption until the host pushes a transition.
    pub initially_online: bool,
}

pub struct EngineRuntime {
    orchestrator: DraftSyncOrchestrator,
    resolver: ResumeEditingUseCase,
    sweep: ResumePendingSyncSweep,
    connectivity: ConnectivityHandle,
    directory: Arc<SharedProjectDirectory>,
}

impl EngineRuntime {
    pub async fn bootstrap(config: RuntimeConfig) -> Result<Self> {
        let data_dir = match config.data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create data dir {}", data_dir.display()))?;

        let sync_config = FileEngineSettings::new(&data_dir).load().await?;

        let db_path = data_dir.join("drafts.sqlite3");
        let pool = init_db_pool(db_path.to_str().context("non-utf8 data directory")?)?;

        let (connectivity_port, connectivity) = WatchConnectivity::new(config.initially_online);
        let connectivity_port: Arc<dyn ConnectivityPort> = Arc::new(connectivity_port);
        let remote_store: Arc<dyn RemoteStorePort> = Arc::new(HttpRemoteStore::new(
            config.remote_base_url,
            sync_config.remote_timeout(),
        )?);
        let directory = Arc::new(SharedProjectDirectory::new());
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);
        let retry_runtime = Arc::new(ReconnectRetryRuntime::new(connectivity_port.clone()));

        let deps = EngineDeps {
            local_cache: Arc::new(DieselCacheRecordRepository::new(pool)),
            remote_store,
            scratch: Arc::new(JsonScratchStore::new(data_dir.clone())),
            connectivity: connectivity_port,
            deferred_retry: retry_runtime.clone(),
            directory: directory.clone(),
            clock: clock.clone(),
            config: sync_config,
        };

        let retry_registry = Arc::new(DeferredRetryRegistry::new(
            deps.deferred_retry.clone(),
            clock.clone(),
        ));
        let replay = Arc::new(ReplayPendingSyncUseCase::new(
            deps.local_cache.clone(),
            deps.remote_store.clone(),
            deps.connectivity.clone(),
            deps.directory.clone(),
            retry_registry.clone(),
        ));
        retry_runtime.set_replay_handler(replay.clone());

        let resolver = ResumeEditingUseCase::with_default_tiers(
            deps.local_cache.clone(),
            deps.remote_store.clone(),
            deps.scratch.clone(),
        );
        let sweep = ResumePendingSyncSweep::new(deps.local_cache.clone(), replay);
        let status = StatusSignal::new(clock, &deps.config);
        let orchestrator = DraftSyncOrchestrator::new(&deps, status, retry_registry);

        info!(data_dir = %data_dir.display(), "draft engine ready");

        Ok(Self {
            orchestrator,
            resolver,
            sweep,
            connectivity,
            directory,
        })
    }

    /// Sole write entry point for the editor UI.
    pub async fn on_mutation(&self, project_id: &ProjectId, snapshot: ds_core::EditorSnapshot) {
        self.orchestrator.on_mutation(project_id, snapshot).await
    }

    /// Sole read entry point for resuming an editing session.
    pub async fn resolve_last_step(&self, project_id: &ProjectId) -> Option<StepId> {
        self.resolver.execute(project_id).await
    }

    /// Replay drafts stranded `pending_sync` by a previous session. Call
    /// once after bootstrap.
    pub async fn drain_pending(&self) -> usize {
        self.sweep.execute().await
    }

    pub fn orchestrator(&self) -> &DraftSyncOrchestrator {
        &self.orchestrator
    }

    pub fn resolver(&self) -> &ResumeEditingUseCase {
        &self.resolver
    }

    /// Handle the host shell uses to push online/offline transitions.
    pub fn connectivity(&self) -> &ConnectivityHandle {
        &self.connectivity
    }

    /// Directory the project-creation flow feeds with durable ids.
    pub fn directory(&self) -> &SharedProjectDirectory {
        &self.directory
    }
}
