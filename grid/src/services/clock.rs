//! Clock and date formatting for the controller pages.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{ErrorContext, GridError, GridResult};

/// Hour display convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormat {
    #[serde(rename = "12h")]
    TwelveHour,
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
}

/// Parse a colon separated clock value (`"H:MM"`, `"HH:MM:SS"`, `"MM:SS"`)
/// into units of its last component.
///
/// `"06:30:00"` is 23400 seconds; `"05:30"` read as a duration is 330 seconds.
pub fn from_clock(clock: &str) -> GridResult<u32> {
    clock.split(':').try_fold(0u32, |total, component| {
        let value: u32 = component.trim().parse().map_err(|_| {
            GridError::parse_with_context(
                format!("invalid clock component '{}'", component),
                ErrorContext::new("from_clock").with_input(clock),
            )
        })?;
        total
            .checked_mul(60)
            .and_then(|t| t.checked_add(value))
            .ok_or_else(|| {
                GridError::parse_with_context(
                    "clock value out of range",
                    ErrorContext::new("from_clock").with_input(clock),
                )
            })
    })
}

fn twelve_hour(hour: u32) -> u32 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

fn meridiem(hour: u32) -> &'static str {
    if hour % 24 < 12 {
        "am"
    } else {
        "pm"
    }
}

/// Format minutes since midnight as a time of day.
///
/// Values outside one day wrap, so a run that started at minute -30 reads
/// `23:30`.
pub fn to_clock(minutes: f64, format: TimeFormat) -> String {
    let total = minutes.floor() as i64;
    let wrapped = total.rem_euclid(24 * 60);
    let hour = (wrapped / 60) as u32;
    let minute = (wrapped % 60) as u32;
    match format {
        TimeFormat::TwentyFourHour => format!("{:02}:{:02}", hour, minute),
        TimeFormat::TwelveHour => {
            format!("{}:{:02}{}", twelve_hour(hour), minute, meridiem(hour))
        }
    }
}

/// Format a duration in seconds as `MM:SS`; minutes are not capped at 60.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// `YYYY-MM-DD`, the date format of the controller API.
pub fn xs_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `Friday 16 October`.
pub fn date_string(date: NaiveDate) -> String {
    date.format("%A %-d %B").to_string()
}

/// Heading of the schedule view; the year is appended only when it differs
/// from the current one.
pub fn schedule_heading(date: NaiveDate, today: NaiveDate) -> String {
    if date.year() == today.year() {
        date_string(date)
    } else {
        format!("{}, {}", date_string(date), date.year())
    }
}

/// The live device clock in the page header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockFace {
    pub hour: String,
    pub minute: String,
    /// Seconds with their leading colon, `":07"`.
    pub second: String,
    /// Empty in 24 hour mode.
    pub meridiem: String,
    pub date: String,
}

impl ClockFace {
    pub fn at(now: NaiveDateTime, format: TimeFormat) -> Self {
        let (hour, meridiem) = match format {
            TimeFormat::TwentyFourHour => (format!("{:02}", now.hour()), String::new()),
            TimeFormat::TwelveHour => (
                twelve_hour(now.hour()).to_string(),
                meridiem(now.hour()).to_string(),
            ),
        };
        Self {
            hour,
            minute: format!("{:02}", now.minute()),
            second: format!(":{:02}", now.second()),
            meridiem,
            date: date_string(now.date()),
        }
    }
}

/// Device time given the browser's local time and the device's offset.
pub fn device_time(local: NaiveDateTime, offset_secs: i64) -> NaiveDateTime {
    local + chrono::Duration::seconds(offset_secs)
}

/// State of a page countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Countdown {
    /// Still running, formatted `HH:MM:SS`.
    Running(String),
    /// Reached zero; the page reloads.
    Finished,
}

/// Countdown display for `remaining_secs` seconds left.
pub fn countdown(remaining_secs: f64) -> Countdown {
    if remaining_secs < 1.0 {
        return Countdown::Finished;
    }
    let total = remaining_secs.floor() as u64;
    Countdown::Running(format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    ))
}
