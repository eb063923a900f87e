//! Auto-repeat scheduling for held keys.
//!
//! The scheduler is a cooperative deadline, not a timer thread: it never
//! blocks and never calls back on its own. The host event loop reads
//! `next_timeout()` and drives the dispatcher when that instant passes.
//! Cancellation is explicit and idempotent.

use crate::Config;
use std::time::{Duration, Instant};
use tracing::trace;

/// Schedules repeat emissions while a key stays pressed.
///
/// Repeatable keys (delete, cursor movement) emit on press and start
/// repeating after a short delay. Character keys get a longer delay so a
/// drag toward a side zone does not fire an accidental repeat first.
#[derive(Debug, Clone)]
pub struct RepeatScheduler {
    interval: Duration,
    start_delay: Duration,
    char_start_delay: Duration,
    deadline: Option<Instant>,
    repeating: bool,
}

impl RepeatScheduler {
    pub fn new(config: &Config) -> Self {
        Self {
            interval: config.repeat_interval(),
            start_delay: config.repeat_start_delay(),
            char_start_delay: config.char_repeat_start_delay(),
            deadline: None,
            repeating: false,
        }
    }

    /// Arm the schedule for a newly pressed or re-zoned key.
    ///
    /// Replaces any schedule already in flight, so zone changes restart the
    /// timing from `now`.
    pub fn start(&mut self, repeatable: bool, now: Instant) {
        let delay = if repeatable {
            self.start_delay
        } else {
            self.char_start_delay
        };
        self.repeating = repeatable;
        self.deadline = Some(now + delay);
        trace!(repeatable, delay_ms = delay.as_millis() as u64, "repeat armed");
    }

    /// Stop the schedule. Cancelling an idle scheduler is a no-op.
    pub fn cancel(&mut self) {
        self.deadline = None;
        self.repeating = false;
    }

    /// Whether the press is in the auto-repeat phase (a repeat has fired, or
    /// the key repeats from the press itself).
    pub fn is_repeating(&self) -> bool {
        self.repeating
    }

    /// The next instant the host should call back, if armed.
    pub fn next_timeout(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fire the schedule if its deadline has passed.
    ///
    /// Returns true when the currently resolved code should be re-emitted;
    /// the schedule then re-arms one interval ahead. Early or spurious calls
    /// return false and change nothing.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = Some(now + self.interval);
                self.repeating = true;
                true
            }
            _ => false,
        }
    }
}
