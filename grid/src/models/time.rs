//! Minute arithmetic shared by the schedule grid and the interval editor.

use chrono::{NaiveDateTime, Timelike};

pub const MINUTES_PER_HOUR: i64 = 60;
pub const HOURS_PER_DAY: i64 = 24;
pub const MINUTES_PER_DAY: i64 = MINUTES_PER_HOUR * HOURS_PER_DAY;

/// Whole minutes elapsed since midnight for `now` (seconds are truncated).
pub fn minute_of_day(now: NaiveDateTime) -> i64 {
    i64::from(now.hour()) * MINUTES_PER_HOUR + i64::from(now.minute())
}

/// An hour/minute pair shown on hover and draft labels, rendered as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct ClockLabel {
    pub hour: u32,
    pub minute: u32,
}

impl ClockLabel {
    pub fn new(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }

    /// Minutes since midnight.
    pub fn minute_of_day(&self) -> i64 {
        i64::from(self.hour) * MINUTES_PER_HOUR + i64::from(self.minute)
    }
}

impl std::fmt::Display for ClockLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
