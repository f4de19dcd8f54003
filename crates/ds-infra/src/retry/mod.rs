mod reconnect_retry;

pub use reconnect_retry::{ReconnectRetryRuntime, UnavailableDeferredRetry};
