use std::time::{SystemTime, UNIX_EPOCH};

use ds_core::ports::ClockPort;

/// Wall clock in epoch milliseconds, the production `ClockPort`.
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX epoch")
            .as_millis() as i64
    }
}
