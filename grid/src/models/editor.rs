//! Value types of the program interval editor.

use serde::{Deserialize, Serialize};

use super::time::{ClockLabel, MINUTES_PER_DAY};

/// A day row of the editor grid (day 0 is the first row of a multi-day grid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridRow {
    pub day: u32,
}

impl GridRow {
    pub fn new(day: u32) -> Self {
        Self { day }
    }

    /// Absolute minute at which this row begins.
    pub fn offset_minutes(&self) -> i64 {
        i64::from(self.day) * MINUTES_PER_DAY
    }
}

/// A pointer position over one hour cell of the editor grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPointer {
    pub row: GridRow,
    /// Hour cell under the pointer, `[0, 24)`.
    pub hour: u8,
    /// Pixel offset from the left edge of the hour cell.
    pub x: f64,
    /// Rendered width of the hour cell in pixels.
    pub cell_width: f64,
}

impl GridPointer {
    pub fn new(row: GridRow, hour: u8, x: f64, cell_width: f64) -> Self {
        Self {
            row,
            hour,
            x,
            cell_width,
        }
    }

    /// Pixel offset from the left edge of the row.
    pub fn row_x(&self) -> f64 {
        f64::from(self.hour) * self.cell_width + self.x
    }

    /// Inside the hovered cell, edges included.
    pub fn within_cell(&self) -> bool {
        self.x >= 0.0 && self.x <= self.cell_width
    }
}

/// A `[start, end]` pair of absolute minutes, serialized as a two-element
/// JSON array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntervalPair(pub i64, pub i64);

impl IntervalPair {
    pub fn new(start: i64, end: i64) -> Self {
        Self(start, end)
    }

    pub fn start(&self) -> i64 {
        self.0
    }

    pub fn end(&self) -> i64 {
        self.1
    }
}

/// The provisionally started, not yet committed interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub row: GridRow,
    /// Snapped start, minutes since the row's midnight.
    pub start: ClockLabel,
    /// Row-relative pixel position of the draft marker's left edge.
    pub anchor_x: f64,
}

/// Part of an editor interval that falls into one `(day, hour)` cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EditorCell {
    pub day: i64,
    pub hour: u8,
    pub left: f64,
    pub width: f64,
    pub pair: IntervalPair,
    /// The last cell of an interval carries its delete handle.
    pub deletable: bool,
}
