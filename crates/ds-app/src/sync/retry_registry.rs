//! Registry of live "retry once back online" intents.
//!
//! At most one live intent exists per project. The host facility is
//! best-effort: when it is unavailable the engine degrades to failing loudly
//! and relying on the user's next foreground write, with no silent retry.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use ds_core::ids::ProjectId;
use ds_core::ports::{ClockPort, DeferredRetryPort};
use ds_core::retry::RetryIntent;

pub struct DeferredRetryRegistry {
    port: Arc<dyn DeferredRetryPort>,
    clock: Arc<dyn ClockPort>,
    intents: Mutex<HashMap<ProjectId, RetryIntent>>,
}

impl DeferredRetryRegistry {
    pub fn new(port: Arc<dyn DeferredRetryPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            port,
            clock,
            intents: Mutex::new(HashMap::new()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.port.is_available()
    }

    /// Ask the host to replay the project's pending write once connectivity
    /// returns. Idempotent while an intent is live.
    pub async fn register(&self, project_id: &ProjectId) {
        let mut intents = self.intents.lock().await;
        if intents.contains_key(project_id) {
            debug!(project = %project_id, "retry intent already live");
            return;
        }

        if !self.port.is_available() {
            warn!(
                project = %project_id,
                "deferred-retry facility unavailable; relying on next foreground write"
            );
            return;
        }

        let intent = RetryIntent::new(project_id, self.clock.now_ms());
        match self.port.register(&intent.tag).await {
            Ok(()) => {
                info!(tag = %intent.tag, "registered deferred retry");
                intents.insert(project_id.clone(), intent);
            }
            Err(err) => {
                warn!(tag = %intent.tag, error = %err, "deferred-retry registration failed");
            }
        }
    }

    /// Drop the live intent after its replay has run (in either outcome, a
    /// later failure registers a fresh one).
    pub async fn complete(&self, project_id: &ProjectId) {
        self.intents.lock().await.remove(project_id);
    }

    pub async fn live_intent(&self, project_id: &ProjectId) -> Option<RetryIntent> {
        self.intents.lock().await.get(project_id).cloned()
    }
}
