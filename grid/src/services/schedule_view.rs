//! The schedule page component: one visible day and its runs.

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::GridResult;
use crate::models::{GridRender, StationRow, TimeInterval};
use crate::routes::{log_query, LogEntry};
use crate::services::clock::{schedule_heading, TimeFormat};
use crate::services::slices::render_slices;

/// Reference date plus the intervals loaded for it.
///
/// Navigating to another day clears the intervals; the caller fetches
/// [`ScheduleView::log_query`] and hands the response to
/// [`ScheduleView::load_log`].
#[derive(Debug, Clone)]
pub struct ScheduleView {
    reference_date: NaiveDate,
    intervals: Vec<TimeInterval>,
    time_format: TimeFormat,
}

impl ScheduleView {
    pub fn new(reference_date: NaiveDate, time_format: TimeFormat) -> Self {
        Self {
            reference_date,
            intervals: Vec::new(),
            time_format,
        }
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    pub fn intervals(&self) -> &[TimeInterval] {
        &self.intervals
    }

    pub fn time_format(&self) -> TimeFormat {
        self.time_format
    }

    /// Replace the intervals with a `/log.json` response for the reference
    /// date. Nothing is replaced when any entry fails to convert.
    pub fn load_log(&mut self, entries: &[LogEntry]) -> GridResult<()> {
        let intervals = entries
            .iter()
            .map(|entry| entry.to_interval(self.reference_date, self.time_format))
            .collect::<GridResult<Vec<_>>>()?;
        log::debug!(
            "Loaded {} intervals for {}",
            intervals.len(),
            self.reference_date
        );
        self.intervals = intervals;
        Ok(())
    }

    pub fn render(&self, now: NaiveDateTime, stations: &[StationRow]) -> GridRender {
        render_slices(&self.intervals, self.reference_date, now, stations)
    }

    fn show(&mut self, date: NaiveDate) {
        if date != self.reference_date {
            self.reference_date = date;
            self.intervals.clear();
        }
    }

    pub fn previous_day(&mut self) {
        if let Some(date) = self.reference_date.pred_opt() {
            self.show(date);
        }
    }

    pub fn next_day(&mut self) {
        if let Some(date) = self.reference_date.succ_opt() {
            self.show(date);
        }
    }

    pub fn today(&mut self, now: NaiveDateTime) {
        self.show(now.date());
    }

    pub fn is_today(&self, now: NaiveDateTime) -> bool {
        self.reference_date == now.date()
    }

    pub fn heading(&self, now: NaiveDateTime) -> String {
        schedule_heading(self.reference_date, now.date())
    }

    /// How often the grid should be re-rendered: only today's grid moves.
    pub fn refresh_interval(&self, now: NaiveDateTime, period: Duration) -> Option<Duration> {
        self.is_today(now).then_some(period)
    }

    pub fn log_query(&self) -> String {
        log_query(self.reference_date)
    }
}
