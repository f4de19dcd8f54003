//! Deferred-retry port - the host runtime's "replay when back online" hook
//!
//! Best-effort: some runtimes do not expose the facility at all, in which
//! case the engine degrades to failing loudly and relying on the user's next
//! foreground write.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeferredRetryError {
    #[error("deferred-retry facility unavailable on this runtime")]
    Unavailable,

    #[error("retry registration failed: {0}")]
    Registration(String),
}

#[async_trait]
pub trait DeferredRetryPort: Send + Sync {
    /// Whether the host runtime exposes the facility at all. Must be checked
    /// before relying on [`register`](Self::register).
    fn is_available(&self) -> bool;

    /// Ask the host to invoke the replay handler for `tag` once connectivity
    /// is confirmed restored. Registering a tag that is already registered
    /// is a no-op, not an error.
    async fn register(&self, tag: &str) -> Result<(), DeferredRetryError>;
}

/// Callback the host invokes when a registered tag becomes replayable.
///
/// Implementations must read the *current* cache record, never a value
/// captured at registration time.
#[async_trait]
pub trait RetryReplayHandler: Send + Sync {
    async fn replay(&self, tag: &str);
}
