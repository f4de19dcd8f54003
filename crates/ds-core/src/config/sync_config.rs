use std::time::Duration;

use serde::Deserialize;

/// Tunable windows of the draft synchronization engine.
///
/// The debounce interval scales with payload size: large payloads are
/// expensive to transmit and are rarely followed by another keystroke-level
/// edit within the window, so they get a longer quiet period.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Upper bound (exclusive) of the small payload class, in serialized
    /// JSON bytes.
    pub small_payload_units: usize,

    /// Upper bound (exclusive) of the medium payload class.
    pub medium_payload_units: usize,

    pub debounce_small_ms: u64,
    pub debounce_medium_ms: u64,
    pub debounce_large_ms: u64,

    /// How long a `Saved` indicator stays up before falling back to idle.
    pub saved_reset_ms: u64,

    /// How long an `Error` indicator stays up before falling back to idle.
    pub error_reset_ms: u64,

    /// Bound on a single remote write or read.
    pub remote_timeout_ms: u64,
}

impl SyncConfig {
    /// v1 defaults (keep stable; persisted settings files rely on them)
    pub fn defaults() -> Self {
        Self {
            small_payload_units: 1_000,
            medium_payload_units: 10_000,
            debounce_small_ms: 1_000,
            debounce_medium_ms: 2_000,
            debounce_large_ms: 5_000,
            saved_reset_ms: 3_000,
            error_reset_ms: 5_000,
            remote_timeout_ms: 10_000,
        }
    }

    /// Debounce window for a payload of the given serialized size.
    pub fn debounce_for(&self, payload_units: usize) -> Duration {
        let ms = if payload_units < self.small_payload_units {
            self.debounce_small_ms
        } else if payload_units < self.medium_payload_units {
            self.debounce_medium_ms
        } else {
            self.debounce_large_ms
        };
        Duration::from_millis(ms)
    }

    pub fn remote_timeout(&self) -> Duration {
        Duration::from_millis(self.remote_timeout_ms)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::defaults()
    }
}
