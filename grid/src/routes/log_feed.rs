use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::GridResult;
use crate::models::{IntervalFlags, ProgramIndex, StationId, TimeInterval, MINUTES_PER_DAY};
use crate::services::clock::{format_duration, from_clock, to_clock, xs_date, TimeFormat};

// =========================================================
// /log.json
// =========================================================

/// Path of the schedule/log endpoint; takes a `date=YYYY-MM-DD` query.
pub const LOG_ENDPOINT: &str = "/log.json";

/// `blocked` is `false` or the name of whatever blocked the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockedFlag {
    Flag(bool),
    By(String),
}

impl Default for BlockedFlag {
    fn default() -> Self {
        BlockedFlag::Flag(false)
    }
}

impl BlockedFlag {
    pub fn blocked_by(&self) -> Option<String> {
        match self {
            BlockedFlag::Flag(false) => None,
            BlockedFlag::Flag(true) => Some(String::new()),
            BlockedFlag::By(name) => Some(name.clone()),
        }
    }
}

/// One scheduled or logged run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub station: StationId,
    #[serde(default)]
    pub program: Option<ProgramIndex>,
    #[serde(default)]
    pub program_name: String,
    /// Present (non-null) for runs taken from the history log.
    #[serde(default)]
    pub active: Option<serde_json::Value>,
    #[serde(default)]
    pub manual: bool,
    #[serde(default)]
    pub blocked: BlockedFlag,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Start time of day, `HH:MM:SS`.
    pub start: String,
    /// Run length, `MM:SS`.
    pub duration: String,
}

impl LogEntry {
    /// Convert into an interval relative to the midnight of `visible_date`.
    ///
    /// Entries dated another day are shifted by whole days, so a run that
    /// started yesterday evening gets a negative start.
    pub fn to_interval(&self, visible_date: NaiveDate, format: TimeFormat) -> GridResult<TimeInterval> {
        let start_seconds = from_clock(&self.start)?;
        let duration_seconds = from_clock(&self.duration)?;

        let day_shift = self
            .date
            .map(|date| (date - visible_date).num_days())
            .unwrap_or(0);
        let start_minutes = f64::from(start_seconds) / 60.0 + (day_shift * MINUTES_PER_DAY) as f64;
        let duration_minutes = f64::from(duration_seconds) / 60.0;

        let flags = IntervalFlags {
            manual: self.manual,
            historical: self.active.is_some(),
            blocked_by: self.blocked.blocked_by(),
        };

        let start_text = to_clock(start_minutes, format);
        let label = match flags.blocked_by.as_deref() {
            Some("") => format!("{} (blocked)", start_text),
            Some(name) => format!("{} (blocked by {})", start_text, name),
            None => format!("{} for {}", start_text, format_duration(f64::from(duration_seconds))),
        };

        let mut interval = TimeInterval::new(self.station, start_minutes, duration_minutes)?
            .with_program_name(self.program_name.clone())
            .with_flags(flags)
            .with_label(label);
        if let Some(index) = self.program {
            interval = interval.with_program(index, self.program_name.clone());
        }
        if let Some(date) = self.date {
            interval = interval.with_date(date);
        }
        Ok(interval)
    }
}

/// Parse a `/log.json` response body.
pub fn parse_log_json(json: &str) -> Result<Vec<LogEntry>> {
    serde_json::from_str(json).context("Failed to deserialize log entries")
}

/// Query string for fetching the log of `date`.
pub fn log_query(date: NaiveDate) -> String {
    format!("{}?date={}", LOG_ENDPOINT, xs_date(date))
}
