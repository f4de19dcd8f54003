//! Dependency grouping for engine construction.
//!
//! This is not a builder: no build steps, no defaults, no hidden logic.
//! The struct literal IS the dependency manifest. Every port must be
//! provided explicitly, which keeps the engine instantiable per test with
//! fakes instead of a real host runtime.

use std::sync::Arc;

use ds_core::config::SyncConfig;
use ds_core::ports::{
    ClockPort, ConnectivityPort, DeferredRetryPort, LocalCachePort, ProjectDirectoryPort,
    RemoteStorePort, ScratchStorePort,
};

pub struct EngineDeps {
    pub local_cache: Arc<dyn LocalCachePort>,
    pub remote_store: Arc<dyn RemoteStorePort>,
    pub scratch: Arc<dyn ScratchStorePort>,
    pub connectivity: Arc<dyn ConnectivityPort>,
    pub deferred_retry: Arc<dyn DeferredRetryPort>,
    pub directory: Arc<dyn ProjectDirectoryPort>,
    pub clock: Arc<dyn ClockPort>,
    pub config: SyncConfig,
}
