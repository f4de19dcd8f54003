use serde::{Deserialize, Serialize};

/// Save-indicator state machine
///
/// Design principle: this is a pure type state machine with only state
/// definitions and transition validation logic. Runtime behaviors like the
/// debounced auto-reset timers are handled by the application layer (ds-app).
///
/// State transitions:
///
/// ```text
/// Idle ──→ Saving ──→ Saved ──→ Idle (auto-reset after 3s)
///             │
///             └─────→ Error ──→ Idle (auto-reset after 5s)
///
/// Saved / Error ──→ Saving (a new mutation cancels the pending reset)
/// Any state ──→ Idle (manual reset)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveState {
    /// No persistence operation in flight or recently finished
    Idle,

    /// A write to some tier is pending or in flight
    Saving,

    /// The most recent write was confirmed by a tier
    Saved,

    /// The most recent write failed
    Error,
}

impl SaveState {
    /// Check if this state schedules an auto-reset back to idle
    pub fn auto_resets(self) -> bool {
        matches!(self, Self::Saved | Self::Error)
    }

    /// Check if a write is currently outstanding
    pub fn is_saving(self) -> bool {
        self == Self::Saving
    }

    /// A new mutation starts (or restarts) a save from any state
    pub fn begin_saving(self) -> Self {
        Self::Saving
    }

    /// Transition after a tier confirms the write
    pub fn on_confirmed(self) -> Self {
        match self {
            Self::Saving => Self::Saved,
            _ => self,
        }
    }

    /// Transition after a tier reports failure
    pub fn on_failed(self) -> Self {
        match self {
            Self::Saving => Self::Error,
            _ => self,
        }
    }

    /// Reset to idle (auto-reset timer expiry or manual reset)
    pub fn reset(self) -> Self {
        Self::Idle
    }
}

impl Default for SaveState {
    fn default() -> Self {
        Self::Idle
    }
}
