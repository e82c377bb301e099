use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::define_id_type;
use crate::error::{ErrorContext, GridError, GridResult};

define_id_type!(i64, StationId);
define_id_type!(i64, ProgramIndex);

/// Visual classification of an interval. Never affects geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalKind {
    Scheduled,
    Manual,
    Historical,
    Blocked,
}

/// Flags carried by a `/log` entry.
///
/// They can co-occur (a logged manual run is both `manual` and `historical`);
/// [`TimeInterval::kind`] collapses them with blocked > historical > manual.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalFlags {
    pub manual: bool,
    pub historical: bool,
    /// Name of whatever blocked the run (rain delay, another program...).
    pub blocked_by: Option<String>,
}

impl IntervalFlags {
    pub fn is_blocked(&self) -> bool {
        self.blocked_by.is_some()
    }
}

/// One scheduled or historical watering event, positioned relative to the
/// midnight of the day being displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeInterval {
    pub station_id: StationId,
    /// Minutes since the reference midnight; negative for runs that started
    /// the previous day, above 1440 for runs spilling into the next one.
    pub start_minutes: f64,
    duration: qtty::Minutes,
    pub program: Option<ProgramIndex>,
    pub program_name: String,
    /// Explicit date tag. Dated intervals are never hidden as stale.
    pub date: Option<NaiveDate>,
    pub flags: IntervalFlags,
    pub label: String,
}

impl TimeInterval {
    /// Create an interval, rejecting negative or non-finite durations.
    pub fn new(station_id: StationId, start_minutes: f64, duration_minutes: f64) -> GridResult<Self> {
        if !start_minutes.is_finite() {
            return Err(GridError::validation_with_context(
                "interval start must be finite",
                ErrorContext::new("TimeInterval::new").with_input(start_minutes),
            ));
        }
        if !duration_minutes.is_finite() || duration_minutes < 0.0 {
            return Err(GridError::validation_with_context(
                "interval duration must be a non-negative number of minutes",
                ErrorContext::new("TimeInterval::new").with_input(duration_minutes),
            ));
        }

        Ok(Self {
            station_id,
            start_minutes,
            duration: qtty::Minutes::new(duration_minutes),
            program: None,
            program_name: String::new(),
            date: None,
            flags: IntervalFlags::default(),
            label: String::new(),
        })
    }

    pub fn with_program(mut self, index: ProgramIndex, name: impl Into<String>) -> Self {
        self.program = Some(index);
        self.program_name = name.into();
        self
    }

    pub fn with_program_name(mut self, name: impl Into<String>) -> Self {
        self.program_name = name.into();
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_flags(mut self, flags: IntervalFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn duration(&self) -> qtty::Minutes {
        self.duration
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration.value()
    }

    /// Effective end, `start + duration`.
    pub fn end_minutes(&self) -> f64 {
        self.start_minutes + self.duration_minutes()
    }

    pub fn kind(&self) -> IntervalKind {
        if self.flags.is_blocked() {
            IntervalKind::Blocked
        } else if self.flags.historical {
            IntervalKind::Historical
        } else if self.flags.manual {
            IntervalKind::Manual
        } else {
            IntervalKind::Scheduled
        }
    }

    /// Hover text shown over a rendered segment.
    pub fn tooltip(&self) -> String {
        format!("{}: {}", self.program_name, self.label)
    }
}
