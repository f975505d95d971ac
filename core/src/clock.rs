//! Wall clock — the single source of "now" for mutations and analytics.
//!
//! All evaluation happens in naive local time. Tests pin the clock so
//! overdue checks and month buckets are reproducible.

use chrono::{Local, NaiveDate, NaiveDateTime};

#[derive(Debug, Clone, PartialEq)]
pub enum BillClock {
    /// Local system time, read on every call.
    System,
    /// A frozen instant.
    Fixed(NaiveDateTime),
}

impl BillClock {
    /// Clock frozen at midnight of the given date. Panics on invalid dates,
    /// so only use it with literals.
    pub fn fixed_on(year: i32, month: u32, day: u32) -> Self {
        let date = NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date");
        BillClock::Fixed(date.and_time(chrono::NaiveTime::MIN))
    }

    pub fn now(&self) -> NaiveDateTime {
        match self {
            BillClock::System => Local::now().naive_local(),
            BillClock::Fixed(at) => *at,
        }
    }
}

impl Default for BillClock {
    fn default() -> Self {
        BillClock::System
    }
}
