//! Pixel to minute snapping for the interval editor.

use crate::error::{ErrorContext, GridError, GridResult};

/// Step counts per hour, coarsest last.
const STEP_OPTIONS: [u32; 5] = [12, 6, 4, 2, 1];

/// Minimum spacing between step marks, in pixels.
const MIN_STEP_PIXELS: f64 = 4.0;

/// Number of snap steps used for a cell `cell_width` pixels wide.
///
/// The finest option whose marks stay at least four pixels apart; one step
/// (whole hours) when the cell is too narrow for any option.
pub fn steps_for_width(cell_width: f64) -> u32 {
    let max_steps = (cell_width / MIN_STEP_PIXELS).max(1.0);
    STEP_OPTIONS
        .iter()
        .copied()
        .find(|steps| f64::from(*steps) < max_steps)
        .unwrap_or(1)
}

/// Snap a pixel offset inside an hour cell to a minute within the hour.
///
/// Offsets left of the cell snap to minute 0 and offsets right of it to the
/// last step, so the result is always below 60.
pub fn snap_to_minute(x: f64, cell_width: f64) -> GridResult<u32> {
    if !cell_width.is_finite() || cell_width <= 0.0 {
        return Err(GridError::geometry_with_context(
            "hour cell width must be a positive number of pixels",
            ErrorContext::new("snap_to_minute").with_input(cell_width),
        ));
    }
    if !x.is_finite() {
        return Err(GridError::geometry_with_context(
            "pointer offset must be finite",
            ErrorContext::new("snap_to_minute").with_input(x),
        ));
    }

    let steps = steps_for_width(cell_width);
    let last_bucket = f64::from(steps - 1);
    let bucket = (x / cell_width * f64::from(steps)).floor().clamp(0.0, last_bucket) as u32;
    let step_minutes = (60.0 / f64::from(steps)).round() as u32;

    Ok(bucket * step_minutes)
}
