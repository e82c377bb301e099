//! Schedule grid render pass.
//!
//! Turns a snapshot of [`TimeInterval`]s into per-station, per-hour
//! [`RenderedSegment`]s. Intervals are clipped at slice boundaries, so a run
//! crossing midnight or several hours shows up as one segment per hour it
//! touches. Runs that already ended today are hidden unless they carry an
//! explicit date tag, and the slice containing the current minute receives a
//! [`NowMarker`].

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{
    minute_of_day, DaySlice, GridRender, IntervalKind, MarkerClass, NowMarker, ProgramClass,
    RenderedSegment, SliceContent, StationRow, TimeInterval, HOURS_PER_DAY, MINUTES_PER_HOUR,
};

/// Narrowest segment, as a fraction of the slice (three minutes).
///
/// The floor applies after clipping, so a marker starting near the right edge
/// can extend past it: a zero-length run exactly on the hour is drawn in the
/// previous slice at `left = 1.0` with this width.
pub const MIN_SEGMENT_WIDTH: f64 = 0.05;

/// An interval ending less than this many minutes into a slice does not
/// count as ending inside it.
const END_DEAD_ZONE: f64 = 0.05;

const SLICE_MINUTES: f64 = MINUTES_PER_HOUR as f64;

/// Render every hour slice of `stations` for `reference_date`.
///
/// `now` hides stale undated runs and places the now marker, both only when
/// `reference_date` is the current day. Within a slice, segments keep the
/// order of `intervals`.
pub fn render_slices(
    intervals: &[TimeInterval],
    reference_date: NaiveDate,
    now: NaiveDateTime,
    stations: &[StationRow],
) -> GridRender {
    let now_minute = minute_of_day(now) as f64;
    let is_today = reference_date == now.date();
    let mut render = GridRender::default();

    for row in stations {
        let station_intervals: Vec<&TimeInterval> = intervals
            .iter()
            .filter(|interval| interval.station_id == row.station_id)
            .filter(|interval| !(is_today && is_stale(interval, now_minute)))
            .collect();

        for hour in 0..HOURS_PER_DAY as u8 {
            let slice = DaySlice::new(row.station_id, hour);
            let slice_start = slice.start_minute();
            let mut content = SliceContent::default();

            for interval in &station_intervals {
                if let Some(segment) = clip_to_slice(interval, slice_start) {
                    render
                        .legend
                        .record(&interval.program_name, segment.program_class);
                    content.segments.push(segment);
                }
            }

            if is_today && slice_start <= now_minute && now_minute < slice_start + SLICE_MINUTES {
                content.now = Some(NowMarker {
                    position: (now_minute - slice_start) / SLICE_MINUTES,
                    on: row.on,
                });
            }

            if !content.is_empty() {
                render.slices.insert(slice, content);
            }
        }
    }

    log::debug!(
        "Rendered {} segments over {} slices for {} ({} intervals, {} stations)",
        render.segment_count(),
        render.slices.len(),
        reference_date,
        intervals.len(),
        stations.len()
    );

    render
}

/// An undated run whose end already passed today.
fn is_stale(interval: &TimeInterval, now_minute: f64) -> bool {
    interval.date.is_none() && interval.end_minutes() < now_minute
}

/// The part of `interval` visible in the slice starting at `slice_start`.
fn clip_to_slice(interval: &TimeInterval, slice_start: f64) -> Option<RenderedSegment> {
    let relative_start = interval.start_minutes - slice_start;
    let relative_end = interval.end_minutes() - slice_start;

    let starts_inside = (0.0..SLICE_MINUTES).contains(&relative_start);
    let ends_inside = END_DEAD_ZONE < relative_end && relative_end <= SLICE_MINUTES;
    let spans_slice = relative_start < 0.0 && relative_end >= SLICE_MINUTES;
    if !(starts_inside || ends_inside || spans_slice) {
        return None;
    }

    let left = relative_start.max(0.0) / SLICE_MINUTES;
    let width = (relative_end.min(SLICE_MINUTES) / SLICE_MINUTES - left).max(MIN_SEGMENT_WIDTH);

    Some(RenderedSegment {
        left,
        width,
        program_class: program_class(interval),
        marker_class: marker_class(interval),
        program_name: interval.program_name.clone(),
        label: interval.label.clone(),
    })
}

fn program_class(interval: &TimeInterval) -> ProgramClass {
    match interval.program {
        Some(index) if !interval.flags.manual => ProgramClass::for_program(index),
        _ => ProgramClass::Manual,
    }
}

fn marker_class(interval: &TimeInterval) -> MarkerClass {
    match interval.kind() {
        IntervalKind::Blocked => MarkerClass::Blocked,
        IntervalKind::Historical => MarkerClass::History,
        IntervalKind::Manual | IntervalKind::Scheduled => MarkerClass::Schedule,
    }
}
