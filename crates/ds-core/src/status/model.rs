use serde::{Deserialize, Serialize};

use super::state::SaveState;

/// Timestamped save-indicator value published to the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveStatus {
    pub state: SaveState,

    /// Epoch milliseconds when `state` was entered.
    pub entered_at_ms: i64,

    /// When the signal will fall back to idle, if an auto-reset is pending.
    pub auto_reset_at_ms: Option<i64>,
}

impl SaveStatus {
    pub fn idle(now_ms: i64) -> Self {
        Self {
            state: SaveState::Idle,
            entered_at_ms: now_ms,
            auto_reset_at_ms: None,
        }
    }

    pub fn saving(now_ms: i64) -> Self {
        Self {
            state: SaveState::Saving,
            entered_at_ms: now_ms,
            auto_reset_at_ms: None,
        }
    }

    pub fn saved(now_ms: i64, reset_after_ms: u64) -> Self {
        Self {
            state: SaveState::Saved,
            entered_at_ms: now_ms,
            auto_reset_at_ms: Some(now_ms + reset_after_ms as i64),
        }
    }

    pub fn error(now_ms: i64, reset_after_ms: u64) -> Self {
        Self {
            state: SaveState::Error,
            entered_at_ms: now_ms,
            auto_reset_at_ms: Some(now_ms + reset_after_ms as i64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_schedules_auto_reset() {
        let status = SaveStatus::saved(1_000, 3_000);
        assert_eq!(status.state, SaveState::Saved);
        assert_eq!(status.auto_reset_at_ms, Some(4_000));
    }

    #[test]
    fn saving_has_no_auto_reset() {
        assert_eq!(SaveStatus::saving(1_000).auto_reset_at_ms, None);
        assert_eq!(SaveStatus::idle(1_000).auto_reset_at_ms, None);
    }
}
