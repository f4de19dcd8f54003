use tokio::sync::watch;

/// Host connectivity signal.
///
/// The orchestrator consults `is_online` to classify remote-write failures;
/// the deferred-retry runtime watches `subscribe` for the offline → online
/// flip.
pub trait ConnectivityPort: Send + Sync {
    fn is_online(&self) -> bool;

    fn subscribe(&self) -> watch::Receiver<bool>;
}
