//! Time source for entry expiry.

use std::cell::Cell;

use chrono::Utc;

/// Source of the current time in epoch milliseconds.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<i64>,
}

impl ManualClock {
    pub fn new(now_millis: i64) -> Self {
        Self {
            now: Cell::new(now_millis),
        }
    }

    pub fn set(&self, now_millis: i64) {
        self.now.set(now_millis);
    }

    pub fn advance(&self, millis: i64) {
        self.now.set(self.now.get().saturating_add(millis));
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_set_and_advance() {
        let clock = ManualClock::new(1_000);
        assert_eq!(clock.now_millis(), 1_000);

        clock.advance(500);
        assert_eq!(clock.now_millis(), 1_500);

        clock.set(42);
        assert_eq!(clock.now_millis(), 42);
    }

    #[test]
    fn test_manual_clock_advance_saturates() {
        let clock = ManualClock::new(i64::MAX - 1);
        clock.advance(10);
        assert_eq!(clock.now_millis(), i64::MAX);
    }

    #[test]
    fn test_system_clock_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
    }
}
