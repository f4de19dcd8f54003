//! Per-project debounce handles for the remote write path.
//!
//! The map is owned by the orchestrator instance, so the engine stays
//! instantiable per test and no timer state leaks across instances.
//! Scheduling for a project that already has a pending handle aborts the old
//! one first, which is what guarantees at most one in-flight remote write
//! per project: the later write always supersedes the earlier.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use tokio::time::sleep;
use tracing::debug;

use ds_core::ids::ProjectId;

pub(crate) struct DebounceMap {
    timers: Arc<Mutex<HashMap<ProjectId, AbortHandle>>>,
}

impl DebounceMap {
    pub(crate) fn new() -> Self {
        Self {
            timers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Run `work` after `delay`, replacing any pending schedule for the same
    /// project. The handle stays in the map while `work` runs, so a
    /// reschedule arriving mid-flight aborts the superseded write.
    pub(crate) async fn schedule<F>(&self, project_id: ProjectId, delay: Duration, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let timers = Arc::clone(&self.timers);
        let key = project_id.clone();

        let mut guard = self.timers.lock().await;
        if let Some(existing) = guard.remove(&project_id) {
            existing.abort();
            debug!(project = %project_id, "superseded pending remote write");
        }

        let handle = tokio::spawn(async move {
            sleep(delay).await;
            work.await;
            timers.lock().await.remove(&key);
        });

        guard.insert(project_id, handle.abort_handle());
    }

    /// Abort a pending schedule. Returns whether one existed.
    pub(crate) async fn cancel(&self, project_id: &ProjectId) -> bool {
        let mut guard = self.timers.lock().await;
        match guard.remove(project_id) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub(crate) async fn is_scheduled(&self, project_id: &ProjectId) -> bool {
        self.timers.lock().await.contains_key(project_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::time::advance;

    #[tokio::test(start_paused = true)]
    async fn fires_after_delay() {
        let map = DebounceMap::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let project_id = ProjectId::from("p1");

        let counter = Arc::clone(&fired);
        map.schedule(project_id.clone(), Duration::from_secs(1), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .await;

        assert!(map.is_scheduled(&project_id).await);
        // let the spawned timer task register its sleep before the clock moves
        tokio::task::yield_now().await;
        advance(Duration::from_secs(1)).await;
        tokio::task::yield_now().await;

        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!map.is_scheduled(&project_id).await);
    }

    #[tokio::test(start_paused = true)]
    async fn reschedule_supersedes_pending_work() {
        let map = DebounceMap::new();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let project_id = ProjectId::from("p1");

        let counter = Arc::clone(&first);
        map.schedule(project_id.clone(), Duration::from_secs(1), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .await;

        let counter = Arc::clone(&second);
        map.schedule(project_id.clone(), Duration::from_secs(2), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .await;

        // let the spawned timer task register its sleep before the clock moves
        tokio::task::yield_now().await;
        advance(Duration::from_secs(3)).await;
        tokio::task::yield_now().await;

        assert_eq!(first.load(Ordering::SeqCst), 0, "superseded work must never run");
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_firing() {
        let map = DebounceMap::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let project_id = ProjectId::from("p1");

        let counter = Arc::clone(&fired);
        map.schedule(project_id.clone(), Duration::from_secs(1), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .await;

        assert!(map.cancel(&project_id).await);
        advance(Duration::from_secs(5)).await;
        tokio::task::yield_now().await;

        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(!map.cancel(&project_id).await);
    }

    #[tokio::test(start_paused = true)]
    async fn projects_are_scheduled_independently() {
        let map = DebounceMap::new();
        let fired = Arc::new(AtomicUsize::new(0));

        for name in ["p1", "p2"] {
            let counter = Arc::clone(&fired);
            map.schedule(ProjectId::from(name), Duration::from_secs(1), async move {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .await;
        }

        // let the spawned timer tasks register their sleeps before the clock moves
        tokio::task::yield_now().await;
        advance(Duration::from_secs(1)).await;
        tokio::task::yield_now().await;

        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }
}
