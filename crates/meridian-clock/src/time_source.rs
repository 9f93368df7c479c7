//! Time abstraction so the controller can run against fixed time in tests.
//!
//! Two readings: wall-clock UTC for hand angles and second alignment, and a
//! monotonic instant for scheduling. Stepping the system clock moves only the
//! first.
//!
//! - `SystemTimeSource`: the real clocks
//! - `ManualTimeSource`: both readings only move when told to

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;

pub trait TimeSource {
    /// Wall-clock time.
    fn now(&self) -> DateTime<Utc>;

    /// Monotonic time, never affected by wall-clock steps.
    fn instant(&self) -> Instant;

    /// Current local time in `tz`.
    fn now_in(&self, tz: Tz) -> DateTime<Tz> {
        self.now().with_timezone(&tz)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn instant(&self) -> Instant {
        Instant::now()
    }
}

/// Controllable time source. Clones share the same readings.
#[derive(Debug, Clone)]
pub struct ManualTimeSource {
    wall: Rc<Cell<DateTime<Utc>>>,
    instant: Rc<Cell<Instant>>,
}

impl ManualTimeSource {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self {
            wall: Rc::new(Cell::new(at)),
            instant: Rc::new(Cell::new(Instant::now())),
        }
    }

    /// Steps the wall clock to `at`. Monotonic time does not move.
    pub fn set(&self, at: DateTime<Utc>) {
        self.wall.set(at);
    }

    /// Lets `by` pass on both clocks. A negative `by` only steps the wall clock.
    pub fn advance(&self, by: TimeDelta) {
        self.wall.set(self.wall.get() + by);
        if let Ok(elapsed) = by.to_std() {
            self.instant.set(self.instant.get() + elapsed);
        }
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> DateTime<Utc> {
        self.wall.get()
    }

    fn instant(&self) -> Instant {
        self.instant.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};
    use std::time::Duration;

    #[test]
    fn clones_share_time() {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let a = ManualTimeSource::new(start);
        let b = a.clone();
        let before = b.instant();
        a.advance(TimeDelta::milliseconds(1500));
        assert_eq!(b.now(), start + TimeDelta::milliseconds(1500));
        assert_eq!(b.instant() - before, Duration::from_millis(1500));
    }

    #[test]
    fn wall_step_leaves_monotonic_time_alone() {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let src = ManualTimeSource::new(start);
        let before = src.instant();

        src.set(start - TimeDelta::minutes(5));
        src.advance(TimeDelta::seconds(-30));
        assert_eq!(src.now(), start - TimeDelta::seconds(330));
        assert_eq!(src.instant(), before);
    }

    #[test]
    fn local_time_follows_zone() {
        // 17:00 UTC in January is 12:00 in New York (EST) and 20:00 in Moscow.
        let src = ManualTimeSource::new(Utc.with_ymd_and_hms(2024, 1, 15, 17, 0, 0).unwrap());
        assert_eq!(src.now_in(Tz::America__New_York).hour(), 12);
        assert_eq!(src.now_in(Tz::Europe__Moscow).hour(), 20);
    }
}
