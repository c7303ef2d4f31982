//! Debounced vs. immediate recomputation.
//!
//! The scheduler never sleeps itself. It records a deadline and the host
//! loop asks [`UpdateScheduler::fire_due`] when its timer expires, which
//! keeps the policy testable with a [`ManualClock`].

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

/// Delay applied to buffer edits before recomputing.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// How a recomputation was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Focus change, file event, configuration change: run now.
    Immediate,
    /// Buffer edit: wait for the debounce window.
    Debounced,
}

/// What the caller should do after [`UpdateScheduler::request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    RunNow,
    Deferred(Instant),
}

#[derive(Debug)]
pub struct UpdateScheduler<C: Clock = SystemClock> {
    clock: C,
    delay: Duration,
    /// At most one pending recomputation.
    pending: Option<Instant>,
}

impl<C: Clock> UpdateScheduler<C> {
    pub fn new(clock: C) -> Self {
        Self::with_delay(clock, DEBOUNCE_DELAY)
    }

    pub fn with_delay(clock: C, delay: Duration) -> Self {
        Self {
            clock,
            delay,
            pending: None,
        }
    }

    /// Register a trigger. Any pending recomputation is cancelled first, so
    /// the latest request always wins.
    pub fn request(&mut self, trigger: Trigger) -> Schedule {
        self.cancel();
        match trigger {
            Trigger::Immediate => Schedule::RunNow,
            Trigger::Debounced => {
                let deadline = self.clock.now() + self.delay;
                self.pending = Some(deadline);
                Schedule::Deferred(deadline)
            }
        }
    }

    /// Drop the pending recomputation. Returns whether one existed.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Consume the pending recomputation if its deadline has passed.
    pub fn fire_due(&mut self) -> bool {
        match self.pending {
            Some(deadline) if self.clock.now() >= deadline => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
