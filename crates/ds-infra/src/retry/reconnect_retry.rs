//! Host deferred-retry runtime driven by the connectivity signal.
//!
//! One waiter task per tag: it parks on the connectivity watch channel and
//! invokes the replay handler once the signal reports online. Registering a
//! tag that already has a live waiter is a no-op, which gives the
//! at-most-effectively-once guarantee per tag.
//!
//! The replay handler is bound once after construction: the handler (the
//! replay use case) itself depends on the retry registry, which depends on
//! this runtime, so binding late is what breaks the wiring cycle.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use tracing::{debug, warn};

use ds_core::ports::{ConnectivityPort, DeferredRetryError, DeferredRetryPort, RetryReplayHandler};

pub struct ReconnectRetryRuntime {
    connectivity: Arc<dyn ConnectivityPort>,
    handler: Arc<OnceLock<Arc<dyn RetryReplayHandler>>>,
    tasks: Arc<Mutex<HashMap<String, AbortHandle>>>,
}

impl ReconnectRetryRuntime {
    pub fn new(connectivity: Arc<dyn ConnectivityPort>) -> Self {
        Self {
            connectivity,
            handler: Arc::new(OnceLock::new()),
            tasks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Bind the replay handler. Call once during bootstrap, before the first
    /// registration can fire.
    pub fn set_replay_handler(&self, handler: Arc<dyn RetryReplayHandler>) {
        if self.handler.set(handler).is_err() {
            warn!("replay handler already bound; ignoring rebind");
        }
    }
}

#[async_trait]
impl DeferredRetryPort for ReconnectRetryRuntime {
    fn is_available(&self) -> bool {
        true
    }

    async fn register(&self, tag: &str) -> Result<(), DeferredRetryError> {
        let mut tasks = self.tasks.lock().await;
        if tasks.contains_key(tag) {
            debug!(tag, "waiter already live");
            return Ok(());
        }

        let mut rx = self.connectivity.subscribe();
        let handler = Arc::clone(&self.handler);
        let tasks_ref = Arc::clone(&self.tasks);
        let task_tag = tag.to_string();

        let handle = tokio::spawn(async move {
            while !*rx.borrow_and_update() {
                if rx.changed().await.is_err() {
                    // host signal gone; nothing will ever flip back online
                    tasks_ref.lock().await.remove(&task_tag);
                    return;
                }
            }
            match handler.get() {
                Some(handler) => {
                    debug!(tag = %task_tag, "connectivity restored; invoking replay");
                    handler.replay(&task_tag).await;
                }
                None => {
                    warn!(tag = %task_tag, "no replay handler bound; dropping retry");
                }
            }
            tasks_ref.lock().await.remove(&task_tag);
        });

        tasks.insert(tag.to_string(), handle.abort_handle());
        Ok(())
    }
}

/// Stub for runtimes without a deferred-retry facility. The engine degrades
/// to failing loudly and relying on the next foreground write.
pub struct UnavailableDeferredRetry;

#[async_trait]
impl DeferredRetryPort for UnavailableDeferredRetry {
    fn is_available(&self) -> bool {
        false
    }

    async fn register(&self, _tag: &str) -> Result<(), DeferredRetryError> {
        Err(DeferredRetryError::Unavailable)
    }
}
