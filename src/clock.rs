//! Wall-clock abstraction.
//!
//! Ledger operations take `now` explicitly; the boundary layer reads it from
//! a [`Clock`] so tests can pin time with [`FixedClock`].

use chrono::{Duration, NaiveDateTime};
use parking_lot::Mutex;

/// Source of the current local date and time.
pub trait Clock: Send + Sync {
    /// The current local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// Reads the system clock in the local timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// A clock that only moves when told to.
///
/// # Example
///
/// ```
/// use attendance_payroll::clock::{Clock, FixedClock};
/// use chrono::{Duration, NaiveDate};
///
/// let start = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap().and_hms_opt(8, 0, 0).unwrap();
/// let clock = FixedClock::new(start);
/// clock.advance(Duration::minutes(20));
/// assert_eq!(clock.now(), start + Duration::minutes(20));
/// ```
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    /// Creates a clock stopped at `now`.
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock() = now;
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_fixed_clock_set() {
        let clock = FixedClock::new(
            NaiveDate::from_ymd_opt(2026, 1, 14)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        );
        let later = NaiveDate::from_ymd_opt(2026, 12, 31)
            .unwrap()
            .and_hms_opt(17, 0, 0)
            .unwrap();
        clock.set(later);
        assert_eq!(clock.now(), later);
    }
}
