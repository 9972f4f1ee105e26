//! Cancellable timer bookkeeping for the shell controllers.
//!
//! The UI is immediate-mode, so there is no setTimeout/setInterval; instead
//! each controller stores deadlines and polls them every frame with the
//! current `Instant`. Superseding or disposing a timer is just clearing the
//! deadline, which keeps cancellation bookkeeping trivial.

use std::time::{Duration, Instant};

/// One-shot timer. Arming again supersedes any previous deadline.
#[derive(Debug, Clone, Copy, Default)]
pub struct Countdown {
    deadline: Option<Instant>,
}

impl Countdown {
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once, the first time it is polled at or past the
    /// deadline. Disarms itself on firing.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

/// Fixed-period repeating timer.
#[derive(Debug, Clone, Copy)]
pub struct Metronome {
    period: Duration,
    next: Option<Instant>,
}

impl Metronome {
    pub fn new(period: Duration) -> Self {
        Self { period, next: None }
    }

    pub fn start(&mut self, now: Instant) {
        self.next = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.next = None;
    }

    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    /// Number of whole periods elapsed since the last poll. Advances the
    /// schedule so a slow frame never double-counts a tick.
    pub fn ticks(&mut self, now: Instant) -> u32 {
        let Some(mut next) = self.next else {
            return 0;
        };
        let mut count = 0;
        while now >= next {
            count += 1;
            next += self.period;
        }
        self.next = Some(next);
        count
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.next
    }
}

/// Earliest of a set of optional deadlines, for scheduling the next repaint.
pub fn earliest(deadlines: impl IntoIterator<Item = Option<Instant>>) -> Option<Instant> {
    deadlines.into_iter().flatten().min()
}
