//! Source of "today"
//!
//! Fines and due dates depend on the current calendar date. The library asks
//! a [`Clock`] instead of reading the system time directly so that tests can
//! pin the date.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};

pub trait Clock {
    /// The current local calendar date
    fn today(&self) -> NaiveDate;

    /// The current instant, used for export timestamps
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the host clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same date (midnight UTC for `now`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }

    fn now(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.0.and_time(NaiveTime::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 13).unwrap();
        let clock = FixedClock(date);

        assert_eq!(clock.today(), date);
        assert_eq!(clock.now().to_rfc3339(), "2024-01-13T00:00:00+00:00");
    }
}
