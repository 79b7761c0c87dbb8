//! Time source for "today" and trailing-window computations.
//!
//! Streak and weekly analytics are evaluated against the caller's local
//! calendar, so every computation that needs the current date takes a
//! [`Clock`] instead of reading the system clock itself.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, Offset, Utc};

/// Source of the current instant and the local calendar
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;

    /// Calendar date of an instant in the clock's timezone
    fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate;

    /// Today's date in the clock's timezone
    fn today(&self) -> NaiveDate {
        self.local_date(self.now())
    }
}

/// Clock backed by the machine's clock and local timezone
///
/// Each instant is converted with the offset in effect at that instant, so
/// an entry keeps its wall-clock date across daylight saving changes.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&Local).date_naive()
    }
}

/// Clock frozen at a given instant
#[derive(Clone, Copy, Debug)]
pub struct FixedClock {
    now: DateTime<Utc>,
    offset: FixedOffset,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { now, offset }
    }

    /// Frozen clock in UTC
    pub fn utc(now: DateTime<Utc>) -> Self {
        Self::new(now, Utc.fix())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }
}
