//! Elapsed-time clock for a maze session
//!
//! The clock itself never reads the wall clock. A driver (a ticker thread,
//! an async interval) delivers one tick per second together with the
//! [`ClockToken`] it was handed when the clock started. Every `start()` and
//! `stop()` moves the clock to a new epoch, so ticks from an interval that
//! belonged to an earlier run are rejected instead of bumping the counter.

use serde::{Deserialize, Serialize};

/// Proof that a tick source belongs to the current clock run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockToken {
    epoch: u64,
}

#[derive(Debug, Clone, Default)]
pub struct SessionClock {
    elapsed_seconds: u64,
    running: bool,
    epoch: u64,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to zero and start counting
    ///
    /// Any token issued before this call becomes stale.
    pub fn start(&mut self) -> ClockToken {
        self.epoch += 1;
        self.elapsed_seconds = 0;
        self.running = true;
        ClockToken { epoch: self.epoch }
    }

    /// Freeze the current value and invalidate the outstanding token
    pub fn stop(&mut self) {
        if self.running {
            self.epoch += 1;
            self.running = false;
        }
    }

    /// Count one second if `token` belongs to the running epoch
    ///
    /// Returns `false` for a stopped clock or a stale token; the driver
    /// should then cancel its interval.
    pub fn tick(&mut self, token: ClockToken) -> bool {
        if !self.running || token.epoch != self.epoch {
            return false;
        }
        self.elapsed_seconds += 1;
        true
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Token of the current run, if the clock is running
    pub fn token(&self) -> Option<ClockToken> {
        self.running.then_some(ClockToken { epoch: self.epoch })
    }
}

/// Format seconds as `MM:SS`
///
/// Minutes keep counting past 59 (`61:01` after 3661 seconds).
pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
