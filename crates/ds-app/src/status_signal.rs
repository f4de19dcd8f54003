//! Save-indicator signal with debounced auto-reset.
//!
//! The pure transition rules live in `ds_core::status::SaveState`; this type
//! adds the runtime behavior: publishing through a watch channel and the
//! auto-reset timers that fall back to idle after a confirmation or failure
//! has been displayed long enough.
//!
//! One instance exists per logical persistence operation. Independent
//! mirrors (the canvas draft and the logo-instructions draft) each own
//! their own signal.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::AbortHandle;
use tokio::time::sleep;
use tracing::debug;

use ds_core::config::SyncConfig;
use ds_core::ports::ClockPort;
use ds_core::status::{SaveState, SaveStatus};

#[derive(Clone)]
pub struct StatusSignal {
    inner: Arc<SignalInner>,
}

struct SignalInner {
    tx: watch::Sender<SaveStatus>,
    clock: Arc<dyn ClockPort>,
    saved_reset_ms: u64,
    error_reset_ms: u64,

    /// Pending auto-reset task, if any. A new `set_saved`/`set_error` or a
    /// `set_saving`/`reset` aborts it before anything else happens, so a
    /// stale timer from an earlier save can never clear a newer status.
    reset_task: Mutex<Option<AbortHandle>>,
}

impl StatusSignal {
    pub fn new(clock: Arc<dyn ClockPort>, config: &SyncConfig) -> Self {
        let (tx, _rx) = watch::channel(SaveStatus::idle(clock.now_ms()));
        Self {
            inner: Arc::new(SignalInner {
                tx,
                clock,
                saved_reset_ms: config.saved_reset_ms,
                error_reset_ms: config.error_reset_ms,
                reset_task: Mutex::new(None),
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SaveStatus> {
        self.inner.tx.subscribe()
    }

    pub fn current(&self) -> SaveStatus {
        self.inner.tx.borrow().clone()
    }

    /// A mutation started a new save. Valid from any state; cancels a
    /// pending auto-reset so the indicator stays on `saving`.
    pub fn set_saving(&self) {
        self.inner.cancel_reset();
        let now = self.inner.clock.now_ms();
        self.inner.tx.send_replace(SaveStatus::saving(now));
    }

    /// A tier confirmed the write. Ignored outside `saving`.
    pub fn set_saved(&self) {
        self.transition(SaveState::on_confirmed, |inner, now| {
            (SaveStatus::saved(now, inner.saved_reset_ms), inner.saved_reset_ms)
        });
    }

    /// A tier failed the write. Ignored outside `saving`.
    pub fn set_error(&self) {
        self.transition(SaveState::on_failed, |inner, now| {
            (SaveStatus::error(now, inner.error_reset_ms), inner.error_reset_ms)
        });
    }

    /// Force idle unconditionally, e.g. when an editor view opens fresh.
    pub fn reset(&self) {
        self.inner.cancel_reset();
        let now = self.inner.clock.now_ms();
        self.inner.tx.send_replace(SaveStatus::idle(now));
    }

    fn transition(
        &self,
        step: fn(SaveState) -> SaveState,
        make: fn(&SignalInner, i64) -> (SaveStatus, u64),
    ) {
        let current = self.inner.tx.borrow().state;
        let next = step(current);
        if next == current {
            debug!(state = ?current, "status transition ignored");
            return;
        }

        self.inner.cancel_reset();
        let now = self.inner.clock.now_ms();
        let (status, reset_after_ms) = make(&self.inner, now);
        self.inner.tx.send_replace(status);
        SignalInner::schedule_reset(&self.inner, reset_after_ms);
    }
}

impl SignalInner {
    fn cancel_reset(&self) {
        if let Some(handle) = self.reset_task.lock().expect("reset task lock").take() {
            handle.abort();
        }
    }

    fn schedule_reset(self: &Arc<Self>, after_ms: u64) {
        let inner = Arc::clone(self);
        let handle = tokio::spawn(async move {
            sleep(Duration::from_millis(after_ms)).await;
            let now = inner.clock.now_ms();
            inner.tx.send_replace(SaveStatus::idle(now));
            inner.reset_task.lock().expect("reset task lock").take();
        });
        *self.reset_task.lock().expect("reset task lock") = Some(handle.abort_handle());
    }
}
