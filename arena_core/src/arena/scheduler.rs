//! Tick sources that drive [`CombatManager::run`](super::CombatManager::run)

use std::thread;
use std::time::{Duration, Instant};

/// Something that says when the next combat tick is due
pub trait TickSource {
    /// Block until the next tick is due. `false` means no more ticks.
    fn next_tick(&mut self) -> bool;
}

/// Wall-clock ticker firing once per period
///
/// The first tick is due one period after the first call. A tick that runs
/// late does not cause a burst of catch-up ticks.
#[derive(Debug, Clone)]
pub struct FixedInterval {
    period: Duration,
    next_due: Option<Instant>,
    remaining: Option<u64>,
}

impl FixedInterval {
    pub fn new(period: Duration) -> Self {
        FixedInterval {
            period,
            next_due: None,
            remaining: None,
        }
    }

    pub fn from_millis(period_ms: u64) -> Self {
        Self::new(Duration::from_millis(period_ms))
    }

    /// Stop after `ticks` ticks
    pub fn with_limit(mut self, ticks: u64) -> Self {
        self.remaining = Some(ticks);
        self
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl TickSource for FixedInterval {
    fn next_tick(&mut self) -> bool {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return false;
            }
            *remaining -= 1;
        }

        let now = Instant::now();
        let due = self.next_due.unwrap_or(now + self.period);
        if due > now {
            thread::sleep(due - now);
        }

        let after = Instant::now();
        self.next_due = Some(if after > due + self.period {
            after + self.period
        } else {
            due + self.period
        });
        true
    }
}

/// Yields a fixed number of ticks without waiting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTicker {
    remaining: u64,
}

impl StepTicker {
    pub fn new(ticks: u64) -> Self {
        StepTicker { remaining: ticks }
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl TickSource for StepTicker {
    fn next_tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}
