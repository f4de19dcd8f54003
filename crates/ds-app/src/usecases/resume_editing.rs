//! Reconstruct "where the user left off" after a reload or on a new device.
//!
//! An ordered chain of lookup capabilities is tried in sequence: the local
//! cache answers fastest and reflects the most recent local activity even if
//! a remote write is still in flight; the remote store is authoritative for
//! a fresh device; the scratch tier is the degrade-gracefully fallback when
//! the durable cache itself is unavailable. First non-null answer wins, no
//! merging across tiers. Additional tiers slot into the chain without
//! restructuring control flow.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info_span, warn, Instrument};

use ds_core::editor::PersistenceTier;
use ds_core::ids::{ProjectId, StepId};
use ds_core::ports::{last_step_key, LocalCachePort, RemoteStorePort, ScratchStorePort};

/// One resumption tier: answer with a step or pass to the next.
#[async_trait]
pub trait StepLookup: Send + Sync {
    /// Diagnostic label of the tier answering (or failing).
    fn tier(&self) -> &'static str;

    async fn find(&self, project_id: &ProjectId) -> Result<Option<StepId>>;
}

pub struct CacheStepLookup {
    local_cache: Arc<dyn LocalCachePort>,
}

impl CacheStepLookup {
    pub fn new(local_cache: Arc<dyn LocalCachePort>) -> Self {
        Self { local_cache }
    }
}

#[async_trait]
impl StepLookup for CacheStepLookup {
    fn tier(&self) -> &'static str {
        PersistenceTier::LocalCache.label()
    }

    async fn find(&self, project_id: &ProjectId) -> Result<Option<StepId>> {
        let record = self
            .local_cache
            .get(project_id)
            .await
            .context("failed to read draft cache record")?;
        Ok(record.and_then(|record| record.last_edited_step))
    }
}

pub struct RemoteStepLookup {
    remote_store: Arc<dyn RemoteStorePort>,
}

impl RemoteStepLookup {
    pub fn new(remote_store: Arc<dyn RemoteStorePort>) -> Self {
        Self { remote_store }
    }
}

#[async_trait]
impl StepLookup for RemoteStepLookup {
    fn tier(&self) -> &'static str {
        PersistenceTier::RemoteStore.label()
    }

    async fn find(&self, project_id: &ProjectId) -> Result<Option<StepId>> {
        self.remote_store
            .fetch_last_step(project_id)
            .await
            .context("failed to read persisted step from remote store")
    }
}

pub struct ScratchStepLookup {
    scratch: Arc<dyn ScratchStorePort>,
}

impl ScratchStepLookup {
    pub fn new(scratch: Arc<dyn ScratchStorePort>) -> Self {
        Self { scratch }
    }
}

#[async_trait]
impl StepLookup for ScratchStepLookup {
    fn tier(&self) -> &'static str {
        "scratch"
    }

    async fn find(&self, project_id: &ProjectId) -> Result<Option<StepId>> {
        let value = self
            .scratch
            .get(&last_step_key(project_id))
            .await
            .context("failed to read scratch step key")?;
        Ok(value.map(StepId::from))
    }
}

pub struct ResumeEditingUseCase {
    lookups: Vec<Arc<dyn StepLookup>>,
}

impl ResumeEditingUseCase {
    pub fn new(lookups: Vec<Arc<dyn StepLookup>>) -> Self {
        Self { lookups }
    }

    /// The standard three-tier chain in priority order.
    pub fn with_default_tiers(
        local_cache: Arc<dyn LocalCachePort>,
        remote_store: Arc<dyn RemoteStorePort>,
        scratch: Arc<dyn ScratchStorePort>,
    ) -> Self {
        Self::new(vec![
            Arc::new(CacheStepLookup::new(local_cache)),
            Arc::new(RemoteStepLookup::new(remote_store)),
            Arc::new(ScratchStepLookup::new(scratch)),
        ])
    }

    /// Sole read entry point for resuming. `None` means every tier came up
    /// empty or unreachable; the caller starts from a fresh position.
    pub async fn execute(&self, project_id: &ProjectId) -> Option<StepId> {
        let span = info_span!("draft_sync.resume", project = %project_id);
        self.execute_inner(project_id).instrument(span).await
    }

    async fn execute_inner(&self, project_id: &ProjectId) -> Option<StepId> {
        for lookup in &self.lookups {
            match lookup.find(project_id).await {
                Ok(Some(step)) => {
                    debug!(tier = lookup.tier(), step = %step, "resumption tier answered");
                    return Some(step);
                }
                Ok(None) => continue,
                Err(err) => {
                    warn!(
                        tier = lookup.tier(),
                        error = %err,
                        "resumption tier failed; trying next"
                    );
                }
            }
        }

        debug!("no tier produced a step; starting fresh");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::Mutex as StdMutex;

    use ds_core::editor::{CacheRecord, EditorSnapshot};
    use ds_core::ports::{LocalCacheError, RemoteStoreError, ScratchStoreError};

    struct TestCache {
        step: Option<StepId>,
        fail: bool,
    }

    #[async_trait]
    impl LocalCachePort for TestCache {
        async fn get(
            &self,
            project_id: &ProjectId,
        ) -> Result<Option<CacheRecord>, LocalCacheError> {
            if self.fail {
                return Err(LocalCacheError::Storage("cache unavailable".to_string()));
            }
            Ok(self.step.clone().map(|step| {
                let snapshot = EditorSnapshot {
                    last_edited_step: Some(step),
                    ..Default::default()
                };
                CacheRecord::from_snapshot(project_id.clone(), &snapshot, 0, false)
            }))
        }

        async fn put(&self, _record: &CacheRecord) -> Result<(), LocalCacheError> {
            Ok(())
        }

        async fn mark_synced(&self, _project_id: &ProjectId) -> Result<(), LocalCacheError> {
            Ok(())
        }

        async fn list_pending(&self) -> Result<Vec<CacheRecord>, LocalCacheError> {
            Ok(Vec::new())
        }

        async fn remove(&self, _project_id: &ProjectId) -> Result<(), LocalCacheError> {
            Ok(())
        }
    }

    struct TestRemote {
        step: Option<StepId>,
        fail: bool,
    }

    #[async_trait]
    impl RemoteStorePort for TestRemote {
        async fn push_draft(
            &self,
            _project_id: &ProjectId,
            _draft: &EditorSnapshot,
        ) -> Result<(), RemoteStoreError> {
            Ok(())
        }

        async fn fetch_last_step(
            &self,
            _project_id: &ProjectId,
        ) -> Result<Option<StepId>, RemoteStoreError> {
            if self.fail {
                return Err(RemoteStoreError::Unreachable("offline".to_string()));
            }
            Ok(self.step.clone())
        }
    }

    struct TestScratch {
        values: StdMutex<HashMap<String, String>>,
    }

    impl TestScratch {
        fn with_step(project: &str, step: &str) -> Self {
            let mut values = HashMap::new();
            values.insert(
                last_step_key(&ProjectId::from(project)),
                step.to_string(),
            );
            Self {
                values: StdMutex::new(values),
            }
        }

        fn empty() -> Self {
            Self {
                values: StdMutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl ScratchStorePort for TestScratch {
        async fn get(&self, key: &str) -> Result<Option<String>, ScratchStoreError> {
            Ok(self.values.lock().expect("values lock").get(key).cloned())
        }

        async fn put(&self, key: &str, value: &str) -> Result<(), ScratchStoreError> {
            self.values
                .lock()
                .expect("values lock")
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    fn resolver(cache: TestCache, remote: TestRemote, scratch: TestScratch) -> ResumeEditingUseCase {
        ResumeEditingUseCase::with_default_tiers(
            Arc::new(cache),
            Arc::new(remote),
            Arc::new(scratch),
        )
    }

    #[tokio::test]
    async fn local_cache_wins_over_remote() {
        let resolver = resolver(
            TestCache {
                step: Some(StepId::from("canvas")),
                fail: false,
            },
            TestRemote {
                step: Some(StepId::from("summary")),
                fail: false,
            },
            TestScratch::empty(),
        );

        let step = resolver.execute(&ProjectId::from("p1")).await;
        assert_eq!(step, Some(StepId::from("canvas")));
    }

    #[tokio::test]
    async fn remote_answers_when_cache_is_empty() {
        let resolver = resolver(
            TestCache {
                step: None,
                fail: false,
            },
            TestRemote {
                step: Some(StepId::from("summary")),
                fail: false,
            },
            TestScratch::empty(),
        );

        let step = resolver.execute(&ProjectId::from("p1")).await;
        assert_eq!(step, Some(StepId::from("summary")));
    }

    #[tokio::test]
    async fn scratch_is_the_last_resort() {
        let resolver = resolver(
            TestCache {
                step: None,
                fail: true,
            },
            TestRemote {
                step: None,
                fail: true,
            },
            TestScratch::with_step("p1", "logo"),
        );

        let step = resolver.execute(&ProjectId::from("p1")).await;
        assert_eq!(step, Some(StepId::from("logo")));
    }

    #[tokio::test]
    async fn failing_tier_degrades_to_the_next() {
        let resolver = resolver(
            TestCache {
                step: Some(StepId::from("canvas")),
                fail: true,
            },
            TestRemote {
                step: Some(StepId::from("summary")),
                fail: false,
            },
            TestScratch::empty(),
        );

        let step = resolver.execute(&ProjectId::from("p1")).await;
        assert_eq!(step, Some(StepId::from("summary")));
    }

    #[tokio::test]
    async fn all_tiers_empty_resolves_to_none() {
        let resolver = resolver(
            TestCache {
                step: None,
                fail: false,
            },
            TestRemote {
                step: None,
                fail: false,
            },
            TestScratch::empty(),
        );

        assert_eq!(resolver.execute(&ProjectId::from("p1")).await, None);
    }
}
