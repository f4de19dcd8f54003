mod debounce;
mod orchestrator;
mod retry_registry;

pub use orchestrator::DraftSyncOrchestrator;
pub use retry_registry::DeferredRetryRegistry;
