//! Time source used by stores.
//!
//! Stores never read the wall clock directly so hosts and tests can pin time.
//! Every value handed out is truncated to millisecond precision, matching
//! what the device store can persist.

use crate::model::timestamp::truncate_to_millis;
use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

/// Source of "now" for note timestamps and id allocation.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        truncate_to_millis(Utc::now())
    }
}

/// Manually driven clock for deterministic timelines.
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: Mutex::new(truncate_to_millis(start)),
        }
    }

    /// Moves the clock by `step` (negative steps are allowed).
    pub fn advance(&self, step: Duration) {
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current += step;
    }

    pub fn set(&self, value: DateTime<Utc>) {
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = truncate_to_millis(value);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
